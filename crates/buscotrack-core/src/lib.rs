//! buscotrack-core - BUSCO completeness tracking
//!
//! Wraps the external BUSCO assembly-quality tool:
//! - run BUSCO in genome mode and collect its output directory
//! - parse the Complete percentage out of `short_summary.txt`
//! - compare evaluations across an iterative improvement loop
//! - write a tab-separated history of runs

pub mod error;
pub mod report;
pub mod result;
pub mod runner;
pub mod summary;
pub mod telemetry;

// Re-export key types
pub use error::BuscoError;
pub use report::read_complete_score;
pub use result::{BuscoResult, UNSCORED};
pub use runner::BuscoRunner;
pub use summary::write_summary;
pub use telemetry::init_tracing;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BuscoError>;
