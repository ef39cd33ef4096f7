use crate::diff::MatchPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tidx")]
#[command(about = "Validate, compare and dump linear and interval feature index files")]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Directory that relative index paths are resolved against
    #[arg(long, global = true, env = "TIDX_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Print diagnostics and discrepancies as JSON
    #[arg(long, global = true, env = "TIDX_JSON")]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check header fields of one or more index files
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Compare two index files structurally
    Diff {
        left: PathBuf,
        right: PathBuf,

        /// How contig entries are paired between the two files
        #[arg(long, value_enum, default_value_t = Matching::Contig)]
        matching: Matching,
    },

    /// Decode index files and print them as JSON
    Dump {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Matching {
    /// Pair entries by contig name
    Contig,
    /// Pair only identical entries
    Value,
}

impl From<Matching> for MatchPolicy {
    fn from(matching: Matching) -> Self {
        match matching {
            Matching::Contig => MatchPolicy::ByContig,
            Matching::Value => MatchPolicy::ByValue,
        }
    }
}
