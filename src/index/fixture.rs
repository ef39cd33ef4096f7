//! Test-only encoder for synthetic index files.

use super::header::{MAGIC, PROPERTY_DICTIONARY_VERSION, SEQUENCE_DICTIONARY_FLAG};
use super::{IntervalIndexEntry, LinearIndexEntry};

#[derive(Debug, Default)]
pub struct IndexWriter {
    buf: Vec<u8>,
}

impl IndexWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn i32(&mut self, value: i32) {
        self.raw(&value.to_ne_bytes());
    }

    pub fn u32(&mut self, value: u32) {
        self.raw(&value.to_ne_bytes());
    }

    pub fn i64(&mut self, value: i64) {
        self.raw(&value.to_ne_bytes());
    }

    pub fn cstring(&mut self, value: &str) {
        self.raw(value.as_bytes());
        self.buf.push(0);
    }

    pub fn linear_entry(&mut self, entry: &LinearIndexEntry) {
        self.cstring(&entry.contig);
        self.i32(entry.bin_width);
        self.i32(entry.start_offsets.len() as i32);
        self.i32(entry.longest_feature);
        self.i32(entry.max_bin);
        self.i32(entry.total_bin);
        for offset in &entry.start_offsets {
            self.i64(*offset);
        }
        self.i64(entry.final_pos);
    }

    pub fn interval_entry(&mut self, entry: &IntervalIndexEntry) {
        self.cstring(&entry.contig);
        self.i32(entry.bins.len() as i32);
        for bin in &entry.bins {
            self.i32(bin.start);
            self.i32(bin.end);
            self.i64(bin.position);
            self.i32(bin.size);
        }
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Header field values to encode; dictionaries are written following the
/// same flag and version gates the decoder applies.
#[derive(Debug, Clone)]
pub struct HeaderFixture {
    pub index_type: i32,
    pub version: i32,
    pub source_file_name: String,
    pub source_file_size: i64,
    pub timestamp: i64,
    pub checksum: String,
    pub flags: u32,
    pub sequences: Vec<String>,
    pub properties: Vec<(String, String)>,
}

impl HeaderFixture {
    pub fn linear(version: i32) -> Self {
        Self {
            index_type: 1,
            version,
            source_file_name: "features.bed".to_string(),
            source_file_size: 123_456,
            timestamp: 1_290_000_000_000,
            checksum: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            flags: 0,
            sequences: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn interval(version: i32) -> Self {
        Self {
            index_type: 2,
            ..Self::linear(version)
        }
    }

    pub fn write(&self, out: &mut IndexWriter) {
        out.raw(MAGIC);
        out.i32(self.index_type);
        out.i32(self.version);
        out.cstring(&self.source_file_name);
        out.i64(self.source_file_size);
        out.i64(self.timestamp);
        out.cstring(&self.checksum);
        out.u32(self.flags);
        if self.flags & SEQUENCE_DICTIONARY_FLAG != 0 {
            out.i32(self.sequences.len() as i32);
            for (i, name) in self.sequences.iter().enumerate() {
                out.cstring(name);
                out.i32(i as i32 * 1000);
            }
        }
        if self.version >= PROPERTY_DICTIONARY_VERSION {
            out.i32(self.properties.len() as i32);
            for (key, value) in &self.properties {
                out.cstring(key);
                out.cstring(value);
            }
        }
    }
}

pub fn linear_file(header: &HeaderFixture, entries: &[LinearIndexEntry]) -> Vec<u8> {
    let mut out = IndexWriter::new();
    header.write(&mut out);
    out.i32(entries.len() as i32);
    for entry in entries {
        out.linear_entry(entry);
    }
    out.finish()
}

pub fn interval_file(header: &HeaderFixture, entries: &[IntervalIndexEntry]) -> Vec<u8> {
    let mut out = IndexWriter::new();
    header.write(&mut out);
    out.i32(entries.len() as i32);
    for entry in entries {
        out.interval_entry(entry);
    }
    out.finish()
}
