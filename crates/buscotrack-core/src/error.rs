//! Error types for buscotrack

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running or scoring a BUSCO evaluation
#[derive(Error, Debug)]
pub enum BuscoError {
    /// The run finished but left no report behind
    #[error("cannot find short_summary.txt on busco run with {0}")]
    SummaryNotFound(String),

    /// A report was produced but holds no completeness line
    #[error("no completeness line in report {}", .0.display())]
    ScoreMissing(PathBuf),

    /// Summary target directory does not exist
    #[error("{} does not exist", .0.display())]
    OutdirMissing(PathBuf),

    /// The tool could not be spawned at all
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
