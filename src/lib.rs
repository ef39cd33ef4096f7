pub mod config;
pub mod diff;
pub mod error;
pub mod index;
pub mod storage;
pub mod validate;

pub use config::Config;
pub use diff::{Discrepancy, MatchPolicy, diff, diff_with};
pub use error::{Error, Result};
pub use index::{Index, IndexBody, IndexHeader, IndexKind, decode};
pub use validate::{Diagnostic, DiagnosticKind, Severity, Validation, validate};
