pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bad magic: expected \"TIDX\", found \"{}\"", .found.escape_ascii())]
    BadMagic { found: [u8; 4] },

    #[error("truncated stream: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid {field} count: {count}")]
    InvalidCount { field: &'static str, count: i32 },

    #[error("unsupported index type: {0}")]
    UnsupportedIndexType(i32),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
