//! The per-evaluation result record and its comparison predicates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentinel score for an assembly that has not been evaluated yet.
pub const UNSCORED: f64 = -1.0;

/// One evaluation of one genome assembly against one lineage database.
///
/// A record is either *unevaluated* (a fresh assembly entering the
/// improvement loop: negative `score`, no `report_dir`) or fully populated
/// by [`BuscoRunner::run`](crate::runner::BuscoRunner::run). `score` and
/// `report_dir` are only ever set together. Records are never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuscoResult {
    /// Path of the evaluated genome assembly.
    pub assembly: String,

    /// Completeness percentage; negative until the assembly is scored.
    pub score: f64,

    /// Output directory of the run that produced `score`.
    pub report_dir: Option<PathBuf>,

    /// Reference lineage database used for scoring.
    pub lineage: Option<String>,
}

impl BuscoResult {
    /// Wrap a brand-new assembly that has not been scored yet.
    pub fn new(assembly: impl Into<String>) -> Self {
        Self {
            assembly: assembly.into(),
            score: UNSCORED,
            report_dir: None,
            lineage: None,
        }
    }

    /// Whether this record still awaits its first evaluation.
    pub fn is_first(&self) -> bool {
        self.score < 0.0 || self.report_dir.is_none()
    }

    /// Whether this record strictly beats `other`. Ties do not count as
    /// improvement.
    pub fn improves_on(&self, other: &BuscoResult) -> bool {
        self.score > other.score
    }
}

// An improvement loop is seeded either with a record from a previous round
// or with the bare path of an unpolished assembly. `impl Into<BuscoResult>`
// accepts both; an existing record passes through unchanged.

impl From<&str> for BuscoResult {
    fn from(assembly: &str) -> Self {
        Self::new(assembly)
    }
}

impl From<String> for BuscoResult {
    fn from(assembly: String) -> Self {
        Self::new(assembly)
    }
}
