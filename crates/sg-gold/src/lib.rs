//! Gold-record comparison framework for skeletal-animation runtimes.
//!
//! Two independently built runtimes sample the same skeleton into a canonical
//! snapshot schema; the diff engine aligns the two trees, diffs every bone at
//! every sampled frame, and aggregates the discrepancies into nested
//! min/avg/max summaries for regression detection.

pub mod diff;
pub mod metric;
pub mod sampler;
pub mod snapshot;
pub mod summary;
