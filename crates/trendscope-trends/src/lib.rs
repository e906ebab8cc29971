//! Per-category trend ranking: recency filtering, engagement ranking,
//! duplicate collapsing with audio linking, and report assembly.

pub mod dedup;
pub mod error;
pub mod pipeline;
pub mod rank;
pub mod recency;
pub mod report;

#[cfg(test)]
pub(crate) mod test_support;

pub use dedup::{are_duplicates, deduplicate, DedupOutcome};
pub use error::TrendError;
pub use pipeline::{build_report, run_trends};
pub use rank::{rank_candidates, rank_order};
pub use recency::{filter_recent, RecencyOutcome};
pub use report::assemble_report;
