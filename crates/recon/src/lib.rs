//! `xref-recon` — pairwise cross-reference engine for watchlist datasets.
//!
//! Pure engine crate: receives source text already read into memory, returns
//! standardized records and per-pair match evidence. No CLI or file IO.

pub mod config;
pub mod dedupe;
pub mod error;
pub mod load;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod standardize;

pub use config::{ExecutionConfig, InvalidRecordPolicy, OutputOrder, XrefConfig};
pub use dedupe::dedupe;
pub use error::XrefError;
pub use load::{load_records, LoadReport, RejectedLine};
pub use matcher::find_matches;
pub use model::{Address, Alias, Evidence, EvidenceKind, IdNumber, PairResult, Record, RunStats};
pub use normalize::normalize;
pub use pipeline::{run, run_sharded, run_with, Shard};
pub use standardize::{parse_record, standardize};
