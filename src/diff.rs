//! Structural comparison of two decoded indexes.
//!
//! Comparison runs in three phases:
//!
//! 1. Header fields, each compared by an explicit rule (scalar equality, or
//!    set/map equality for the dictionaries).
//! 2. A type gate: indexes of different types produce a single
//!    [`Discrepancy::TypeMismatch`] and their bodies are not compared.
//! 3. Per-contig entries, paired according to a [`MatchPolicy`] and then
//!    compared field by field.

use crate::index::{Index, IndexBody, IndexHeader, IntervalIndexEntry, LinearIndexEntry};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// How entries of the left index are paired with entries of the right one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Pair entries by contig name, then report differing fields
    #[default]
    ByContig,
    /// Pair only whole-entry equal values; any difference shows up as an
    /// entry missing from one side
    ByValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    Field {
        field: String,
        left: String,
        right: String,
    },
    TypeMismatch {
        left: i32,
        right: i32,
    },
    OnlyInLeft {
        contig: String,
    },
    OnlyInRight {
        contig: String,
    },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::Field { field, left, right } => {
                write!(f, "{}: {} != {}", field, left, right)
            }
            Discrepancy::TypeMismatch { left, right } => {
                write!(f, "Indexes are not the same type ({} != {})", left, right)
            }
            Discrepancy::OnlyInLeft { contig } => write!(f, "contig {} only in left", contig),
            Discrepancy::OnlyInRight { contig } => write!(f, "contig {} only in right", contig),
        }
    }
}

pub fn diff(left: &Index, right: &Index) -> Vec<Discrepancy> {
    diff_with(left, right, MatchPolicy::default())
}

pub fn diff_with(left: &Index, right: &Index, policy: MatchPolicy) -> Vec<Discrepancy> {
    let mut out = Vec::new();

    diff_header(&left.header, &right.header, &mut out);

    if left.header.index_type != right.header.index_type {
        out.push(Discrepancy::TypeMismatch {
            left: left.header.index_type,
            right: right.header.index_type,
        });
        return out;
    }

    match (&left.body, &right.body) {
        (IndexBody::Linear(l), IndexBody::Linear(r)) => {
            diff_entries(l, r, policy, |e| &e.contig, diff_linear_entry, &mut out)
        }
        (IndexBody::Interval(l), IndexBody::Interval(r)) => {
            diff_entries(l, r, policy, |e| &e.contig, diff_interval_entry, &mut out)
        }
        // Bodies always follow index_type, which was equal above
        (l, r) => out.push(Discrepancy::TypeMismatch {
            left: l.kind() as i32,
            right: r.kind() as i32,
        }),
    }

    out
}

fn push_field(out: &mut Vec<Discrepancy>, field: String, left: String, right: String) {
    out.push(Discrepancy::Field { field, left, right });
}

fn scalar<T: PartialEq + fmt::Display>(out: &mut Vec<Discrepancy>, field: &str, left: &T, right: &T) {
    if left != right {
        push_field(out, field.to_string(), left.to_string(), right.to_string());
    }
}

fn diff_header(left: &IndexHeader, right: &IndexHeader, out: &mut Vec<Discrepancy>) {
    // Destructured so a new header field cannot be silently left out
    let IndexHeader {
        index_type: _,
        version,
        source_file_name,
        source_file_size,
        timestamp,
        checksum,
        flags,
        sequence_dictionary,
        property_dictionary,
    } = left;

    scalar(out, "version", version, &right.version);
    scalar(out, "source_file_name", source_file_name, &right.source_file_name);
    scalar(out, "source_file_size", source_file_size, &right.source_file_size);
    scalar(out, "timestamp", timestamp, &right.timestamp);
    scalar(out, "checksum", checksum, &right.checksum);
    scalar(out, "flags", flags, &right.flags);

    let left_names = name_set(sequence_dictionary);
    let right_names = name_set(&right.sequence_dictionary);
    if left_names != right_names {
        push_field(
            out,
            "sequence_dictionary".to_string(),
            render_set(&left_names),
            render_set(&right_names),
        );
    }

    if property_dictionary != &right.property_dictionary {
        push_field(
            out,
            "property_dictionary".to_string(),
            render_map(property_dictionary),
            render_map(&right.property_dictionary),
        );
    }
}

fn name_set(names: &Option<Vec<String>>) -> Option<BTreeSet<&str>> {
    names
        .as_ref()
        .map(|names| names.iter().map(String::as_str).collect())
}

fn render_set(set: &Option<BTreeSet<&str>>) -> String {
    match set {
        Some(set) => format!("{{{}}}", set.iter().copied().collect::<Vec<_>>().join(", ")),
        None => "absent".to_string(),
    }
}

fn render_map(map: &Option<BTreeMap<String, String>>) -> String {
    match map {
        Some(map) => {
            let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{{{}}}", pairs.join(", "))
        }
        None => "absent".to_string(),
    }
}

/// Pair up entries per `policy` and compare each pair with `diff_entry`
fn diff_entries<E, N, D>(
    left: &[E],
    right: &[E],
    policy: MatchPolicy,
    name: N,
    diff_entry: D,
    out: &mut Vec<Discrepancy>,
) where
    E: PartialEq,
    N: Fn(&E) -> &String,
    D: Fn(&E, &E, &mut Vec<Discrepancy>),
{
    let mut claimed = vec![false; right.len()];

    for l in left {
        let found = right.iter().enumerate().position(|(i, r)| {
            !claimed[i]
                && match policy {
                    MatchPolicy::ByContig => name(l) == name(r),
                    MatchPolicy::ByValue => l == r,
                }
        });
        match found {
            Some(i) => {
                claimed[i] = true;
                diff_entry(l, &right[i], out);
            }
            None => out.push(Discrepancy::OnlyInLeft {
                contig: name(l).clone(),
            }),
        }
    }

    for (r, _) in right.iter().zip(&claimed).filter(|(_, claimed)| !**claimed) {
        out.push(Discrepancy::OnlyInRight {
            contig: name(r).clone(),
        });
    }
}

fn diff_linear_entry(left: &LinearIndexEntry, right: &LinearIndexEntry, out: &mut Vec<Discrepancy>) {
    let LinearIndexEntry {
        contig,
        bin_width,
        longest_feature,
        max_bin,
        total_bin,
        start_offsets,
        final_pos,
    } = left;
    let field = |name: &str| format!("{}.{}", contig, name);

    scalar(out, &field("contig"), contig, &right.contig);
    scalar(out, &field("bin_width"), bin_width, &right.bin_width);
    scalar(out, &field("bin_count"), &left.bin_count(), &right.bin_count());
    scalar(out, &field("longest_feature"), longest_feature, &right.longest_feature);
    scalar(out, &field("max_bin"), max_bin, &right.max_bin);
    scalar(out, &field("total_bin"), total_bin, &right.total_bin);
    sequence(out, &field("start_offsets"), start_offsets, &right.start_offsets);
    scalar(out, &field("final_pos"), final_pos, &right.final_pos);
}

fn diff_interval_entry(
    left: &IntervalIndexEntry,
    right: &IntervalIndexEntry,
    out: &mut Vec<Discrepancy>,
) {
    let IntervalIndexEntry { contig, bins } = left;
    let field = |name: &str| format!("{}.{}", contig, name);

    scalar(out, &field("contig"), contig, &right.contig);
    scalar(out, &field("bin_count"), &bins.len(), &right.bins.len());
    for (i, (l, r)) in bins.iter().zip(&right.bins).enumerate() {
        scalar(out, &field(&format!("bins[{}].start", i)), &l.start, &r.start);
        scalar(out, &field(&format!("bins[{}].end", i)), &l.end, &r.end);
        scalar(out, &field(&format!("bins[{}].position", i)), &l.position, &r.position);
        scalar(out, &field(&format!("bins[{}].size", i)), &l.size, &r.size);
    }
}

/// Element-wise comparison; positions past the shorter side are reported as absent
fn sequence<T: PartialEq + fmt::Display>(out: &mut Vec<Discrepancy>, field: &str, left: &[T], right: &[T]) {
    let render = |v: Option<&T>| v.map_or_else(|| "absent".to_string(), |v| v.to_string());
    for i in 0..left.len().max(right.len()) {
        let (l, r) = (left.get(i), right.get(i));
        if l != r {
            push_field(out, format!("{}[{}]", field, i), render(l), render(r));
        }
    }
}

impl Index {
    pub fn diff(&self, other: &Index) -> Vec<Discrepancy> {
        diff(self, other)
    }
}
