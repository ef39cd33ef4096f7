use super::ByteCursor;
use crate::Result;
use serde::Serialize;

/// On-disk size of one bin record: start, end, position, size
const BIN_RECORD_LEN: usize = 4 + 4 + 8 + 4;

/// One explicit bin of an interval index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalBin {
    pub start: i32,
    pub end: i32,
    /// Byte offset of the bin in the feature file
    pub position: i64,
    /// Byte length of the bin in the feature file
    pub size: i32,
}

/// Per-contig table of an interval index. Bins may overlap and are not
/// required to be sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalIndexEntry {
    pub contig: String,
    pub bins: Vec<IntervalBin>,
}

impl IntervalIndexEntry {
    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let contig = cursor.read_cstring()?;
        let bin_count = cursor.read_count("bin")?;

        let mut bins = Vec::with_capacity(bin_count.min(cursor.remaining() / BIN_RECORD_LEN));
        for _ in 0..bin_count {
            let start = cursor.read_i32()?;
            let end = cursor.read_i32()?;
            let position = cursor.read_i64()?;
            let size = cursor.read_i32()?;
            bins.push(IntervalBin {
                start,
                end,
                position,
                size,
            });
        }

        Ok(Self { contig, bins })
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }
}
