use super::{ByteCursor, IndexKind};
use crate::{Error, Result};
use bytes::Bytes;
use serde::Serialize;
use std::collections::BTreeMap;

/// Magic tag opening every index file
pub const MAGIC: &[u8; 4] = b"TIDX";

/// Flag bit announcing a sequence dictionary after the flags word
pub const SEQUENCE_DICTIONARY_FLAG: u32 = 0x8000;

/// First version carrying a property dictionary
pub const PROPERTY_DICTIONARY_VERSION: i32 = 3;

/// Common prologue shared by linear and interval indexes.
///
/// `index_type` and `version` are kept raw so out-of-range values survive
/// decoding and can be reported by [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexHeader {
    pub index_type: i32,
    pub version: i32,
    pub source_file_name: String,
    pub source_file_size: i64,
    pub timestamp: i64,
    pub checksum: String,
    pub flags: u32,
    /// Sequence names, present iff [`SEQUENCE_DICTIONARY_FLAG`] is set
    pub sequence_dictionary: Option<Vec<String>>,
    /// Present iff `version >= 3`
    pub property_dictionary: Option<BTreeMap<String, String>>,
}

impl IndexHeader {
    /// Decode only the header of an index file
    pub fn decode(bytes: impl Into<Bytes>) -> Result<Self> {
        Self::read(&mut ByteCursor::new(bytes))
    }

    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let magic = cursor.read_magic(MAGIC.len())?;
        if magic.as_ref() != MAGIC {
            let mut found = [0u8; 4];
            found.copy_from_slice(&magic);
            return Err(Error::BadMagic { found });
        }

        let index_type = cursor.read_i32()?;
        let version = cursor.read_i32()?;
        let source_file_name = cursor.read_cstring()?;
        let source_file_size = cursor.read_i64()?;
        let timestamp = cursor.read_i64()?;
        let checksum = cursor.read_cstring()?;
        let flags = cursor.read_u32()?;

        // Sequence dictionary always precedes the property dictionary
        let sequence_dictionary = if flags & SEQUENCE_DICTIONARY_FLAG != 0 {
            Some(read_sequence_dictionary(cursor)?)
        } else {
            None
        };

        let property_dictionary = if version >= PROPERTY_DICTIONARY_VERSION {
            Some(read_property_dictionary(cursor)?)
        } else {
            None
        };

        tracing::debug!(
            index_type,
            version,
            flags,
            header_len = cursor.position(),
            "decoded index header"
        );

        Ok(Self {
            index_type,
            version,
            source_file_name,
            source_file_size,
            timestamp,
            checksum,
            flags,
            sequence_dictionary,
            property_dictionary,
        })
    }

    /// Layout of the body, if `index_type` names a known one
    pub fn kind(&self) -> Option<IndexKind> {
        IndexKind::try_from(self.index_type).ok()
    }

    pub fn has_sequence_dictionary(&self) -> bool {
        self.flags & SEQUENCE_DICTIONARY_FLAG != 0
    }
}

fn read_sequence_dictionary(cursor: &mut ByteCursor) -> Result<Vec<String>> {
    let count = cursor.read_count("sequence dictionary")?;
    // Each record is at least a NUL and an int32
    let mut names = Vec::with_capacity(count.min(cursor.remaining() / 5));
    for _ in 0..count {
        names.push(cursor.read_cstring()?);
        // Size field is reserved and not retained
        cursor.read_i32()?;
    }
    Ok(names)
}

fn read_property_dictionary(cursor: &mut ByteCursor) -> Result<BTreeMap<String, String>> {
    let count = cursor.read_count("property dictionary")?;
    let mut properties = BTreeMap::new();
    for _ in 0..count {
        let key = cursor.read_cstring()?;
        let value = cursor.read_cstring()?;
        properties.insert(key, value);
    }
    Ok(properties)
}
