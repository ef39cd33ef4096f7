use super::ByteCursor;
use crate::Result;
use serde::Serialize;

/// Per-contig table of a linear index: fixed-width bins, each carrying the
/// cumulative file offset of the first feature starting in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinearIndexEntry {
    pub contig: String,
    pub bin_width: i32,
    pub longest_feature: i32,
    pub max_bin: i32,
    pub total_bin: i32,
    /// Read in file order; no monotonicity is assumed
    pub start_offsets: Vec<i64>,
    pub final_pos: i64,
}

impl LinearIndexEntry {
    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let contig = cursor.read_cstring()?;
        let bin_width = cursor.read_i32()?;
        let bin_count = cursor.read_count("bin")?;
        let longest_feature = cursor.read_i32()?;
        let max_bin = cursor.read_i32()?;
        let total_bin = cursor.read_i32()?;

        let mut start_offsets = Vec::with_capacity(bin_count.min(cursor.remaining() / 8));
        for _ in 0..bin_count {
            start_offsets.push(cursor.read_i64()?);
        }
        let final_pos = cursor.read_i64()?;

        Ok(Self {
            contig,
            bin_width,
            longest_feature,
            max_bin,
            total_bin,
            start_offsets,
            final_pos,
        })
    }

    pub fn bin_count(&self) -> usize {
        self.start_offsets.len()
    }
}
