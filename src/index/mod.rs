//! Decoder for linear and interval feature index files.
//!
//! An index file is a common [`IndexHeader`] followed by a per-contig body
//! whose layout depends on the header's index type:
//!
//! - [`LinearIndexEntry`] - uniform-width bins with cumulative start offsets
//! - [`IntervalIndexEntry`] - explicit, possibly overlapping bins
//!
//! Decoding is a single forward pass over an in-memory buffer and is
//! all-or-nothing: any failure yields an error and no partial [`Index`].
//!
//! # Example
//!
//! ```no_run
//! use tidx::index::decode;
//!
//! # fn main() -> tidx::Result<()> {
//! let bytes = std::fs::read("features.bed.idx")?;
//! let index = decode(bytes)?;
//! println!("{} contigs", index.body.len());
//! # Ok(())
//! # }
//! ```

mod cursor;
mod header;
mod interval;
mod linear;

#[cfg(test)]
pub(crate) mod fixture;

pub use cursor::ByteCursor;
pub use header::{IndexHeader, MAGIC, PROPERTY_DICTIONARY_VERSION, SEQUENCE_DICTIONARY_FLAG};
pub use interval::{IntervalBin, IntervalIndexEntry};
pub use linear::LinearIndexEntry;

use crate::{Error, Result};
use bytes::Bytes;
use serde::Serialize;

/// Body layouts, keyed by the header's `index_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Linear = 1,
    Interval = 2,
}

impl TryFrom<i32> for IndexKind {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(IndexKind::Linear),
            2 => Ok(IndexKind::Interval),
            other => Err(Error::UnsupportedIndexType(other)),
        }
    }
}

/// Per-contig entries; a body never mixes layouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "lowercase")]
pub enum IndexBody {
    Linear(Vec<LinearIndexEntry>),
    Interval(Vec<IntervalIndexEntry>),
}

impl IndexBody {
    pub fn read(kind: IndexKind, cursor: &mut ByteCursor) -> Result<Self> {
        let contig_count = cursor.read_count("contig")?;
        let body = match kind {
            IndexKind::Linear => {
                let mut entries = Vec::new();
                for _ in 0..contig_count {
                    entries.push(LinearIndexEntry::read(cursor)?);
                }
                IndexBody::Linear(entries)
            }
            IndexKind::Interval => {
                let mut entries = Vec::new();
                for _ in 0..contig_count {
                    entries.push(IntervalIndexEntry::read(cursor)?);
                }
                IndexBody::Interval(entries)
            }
        };
        tracing::debug!(?kind, contig_count, "decoded index body");
        Ok(body)
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            IndexBody::Linear(_) => IndexKind::Linear,
            IndexBody::Interval(_) => IndexKind::Interval,
        }
    }

    /// Number of contigs
    pub fn len(&self) -> usize {
        match self {
            IndexBody::Linear(entries) => entries.len(),
            IndexBody::Interval(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contigs(&self) -> Vec<&str> {
        match self {
            IndexBody::Linear(entries) => entries.iter().map(|e| e.contig.as_str()).collect(),
            IndexBody::Interval(entries) => entries.iter().map(|e| e.contig.as_str()).collect(),
        }
    }
}

/// A fully decoded index file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    pub header: IndexHeader,
    pub body: IndexBody,
}

impl Index {
    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let header = IndexHeader::read(cursor)?;
        let kind = IndexKind::try_from(header.index_type)?;
        let body = IndexBody::read(kind, cursor)?;
        Ok(Self { header, body })
    }

    pub fn kind(&self) -> IndexKind {
        self.body.kind()
    }
}

/// Decode a complete index file held in memory
pub fn decode(bytes: impl Into<Bytes>) -> Result<Index> {
    let mut cursor = ByteCursor::new(bytes);
    let index = Index::read(&mut cursor)?;
    if cursor.remaining() > 0 {
        tracing::warn!(
            offset = cursor.position(),
            trailing = cursor.remaining(),
            "ignoring trailing bytes after index body"
        );
    }
    Ok(index)
}
