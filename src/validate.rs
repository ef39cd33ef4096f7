//! Range and non-emptiness checks over a decoded header.
//!
//! Every check runs; the result carries all diagnostics found rather than
//! stopping at the first one.

use crate::index::{Index, IndexHeader};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    InvalidType,
    InvalidVersion,
    EmptyFileName,
    EmptyTimestamp,
    EmptyChecksum,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::InvalidType | DiagnosticKind::InvalidVersion => Severity::Error,
            DiagnosticKind::EmptyFileName
            | DiagnosticKind::EmptyTimestamp
            | DiagnosticKind::EmptyChecksum => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

/// Outcome of validating one header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub diagnostics: Vec<Diagnostic>,
}

impl Validation {
    /// True when no error-level diagnostic was raised; warnings do not fail
    pub fn passed(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|d| d.severity < Severity::Error)
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }
}

pub const INDEX_TYPES: std::ops::RangeInclusive<i32> = 1..=2;
pub const VERSIONS: std::ops::RangeInclusive<i32> = 1..=3;

pub fn validate(header: &IndexHeader) -> Validation {
    let mut diagnostics = Vec::new();

    if !INDEX_TYPES.contains(&header.index_type) {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::InvalidType,
            format!(
                "index type {} is outside {}..={}",
                header.index_type,
                INDEX_TYPES.start(),
                INDEX_TYPES.end()
            ),
        ));
    }

    if !VERSIONS.contains(&header.version) {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::InvalidVersion,
            format!(
                "version {} is outside {}..={}",
                header.version,
                VERSIONS.start(),
                VERSIONS.end()
            ),
        ));
    }

    if header.source_file_name.is_empty() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::EmptyFileName,
            "source file name is empty".to_string(),
        ));
    }

    if header.timestamp == 0 {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::EmptyTimestamp,
            "timestamp is zero".to_string(),
        ));
    }

    if header.checksum.is_empty() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::EmptyChecksum,
            "checksum is empty".to_string(),
        ));
    }

    Validation { diagnostics }
}

impl Index {
    pub fn validate(&self) -> Validation {
        validate(&self.header)
    }
}
