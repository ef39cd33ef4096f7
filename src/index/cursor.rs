use crate::{Error, Result};
use bytes::{Buf, Bytes};

/// Forward-only reader over an in-memory index file.
///
/// All integers are read in native byte order. Every read checks the
/// remaining length first and fails with [`Error::TruncatedStream`] instead of
/// panicking inside [`Buf`].
#[derive(Debug, Clone)]
pub struct ByteCursor {
    buf: Bytes,
    len: usize,
}

impl ByteCursor {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        let buf = bytes.into();
        let len = buf.len();
        Self { buf, len }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> usize {
        self.len - self.buf.remaining()
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.buf.remaining() < needed {
            return Err(Error::TruncatedStream {
                offset: self.position(),
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    /// Read the next `n` bytes verbatim
    pub fn read_magic(&mut self, n: usize) -> Result<Bytes> {
        self.ensure(n)?;
        Ok(self.buf.split_to(n))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32_ne())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_ne())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.ensure(8)?;
        Ok(self.buf.get_i64_ne())
    }

    /// Read a NUL-terminated string, consuming the terminator.
    ///
    /// Running out of data before the terminator is a truncation, not an
    /// implicit end of string.
    pub fn read_cstring(&mut self) -> Result<String> {
        let Some(nul) = self.buf.iter().position(|&b| b == 0) else {
            return Err(Error::TruncatedStream {
                offset: self.position(),
                needed: self.buf.remaining() + 1,
                remaining: self.buf.remaining(),
            });
        };
        let text = self.buf.split_to(nul);
        self.buf.advance(1);
        Ok(String::from_utf8_lossy(&text).into_owned())
    }

    /// Read a count field that must not be negative
    pub fn read_count(&mut self, field: &'static str) -> Result<usize> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| Error::InvalidCount { field, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_of(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn test_reads_native_integers_in_order() {
        let data = bytes_of(&[
            &(-7i32).to_ne_bytes(),
            &0x8000u32.to_ne_bytes(),
            &(1i64 << 40).to_ne_bytes(),
        ]);
        let mut cursor = ByteCursor::new(data);

        assert_eq!(cursor.read_i32().unwrap(), -7);
        assert_eq!(cursor.read_u32().unwrap(), 0x8000);
        assert_eq!(cursor.read_i64().unwrap(), 1 << 40);
        assert_eq!(cursor.position(), 16);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_magic_returns_bytes_verbatim() {
        let mut cursor = ByteCursor::new(&b"TIDXrest"[..]);
        assert_eq!(&cursor.read_magic(4).unwrap()[..], b"TIDX");
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_read_cstring_consumes_terminator() {
        let mut cursor = ByteCursor::new(&b"chr1\0\0x"[..]);
        assert_eq!(cursor.read_cstring().unwrap(), "chr1");
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.read_cstring().unwrap(), "");
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_unterminated_cstring_is_truncation() {
        let mut cursor = ByteCursor::new(&b"abc"[..]);
        match cursor.read_cstring() {
            Err(Error::TruncatedStream {
                offset,
                needed,
                remaining,
            }) => {
                assert_eq!(offset, 0);
                assert_eq!(needed, 4);
                assert_eq!(remaining, 3);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_short_integer_read_is_truncation_and_does_not_advance() {
        let mut cursor = ByteCursor::new(vec![1u8, 2, 3]);
        assert!(matches!(
            cursor.read_i32(),
            Err(Error::TruncatedStream { needed: 4, .. })
        ));
        assert!(matches!(
            cursor.read_i64(),
            Err(Error::TruncatedStream { needed: 8, .. })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let mut cursor = ByteCursor::new((-1i32).to_ne_bytes().to_vec());
        assert!(matches!(
            cursor.read_count("bin"),
            Err(Error::InvalidCount {
                field: "bin",
                count: -1
            })
        ));
    }
}
