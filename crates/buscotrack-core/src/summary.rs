//! Tab-separated run-history summaries.

use crate::error::BuscoError;
use crate::result::BuscoResult;
use crate::Result;
use std::path::Path;
use tracing::info;

/// Column layout of `results.tsv`. The order is the file-format contract.
const COLUMNS: [&str; 5] = ["assembly", "lineage", "busco_score", "busco_path", "is_best"];

/// Rendering of absent optional fields.
const ABSENT: &str = "-";

/// Write the run history to `<outdir>/results.tsv`, overwriting any
/// previous summary.
///
/// `outdir` must already exist. Rows appear in input order; the record at
/// index `best` is flagged `True` in the `is_best` column, all others
/// `False`.
pub fn write_summary(outdir: &Path, best: usize, results: &[BuscoResult]) -> Result<()> {
    if !outdir.is_dir() {
        return Err(BuscoError::OutdirMissing(outdir.to_path_buf()));
    }

    let mut table = String::new();
    table.push_str(&COLUMNS.join("\t"));
    table.push('\n');

    for (index, result) in results.iter().enumerate() {
        let row = [
            result.assembly.clone(),
            result
                .lineage
                .clone()
                .unwrap_or_else(|| ABSENT.to_string()),
            result.score.to_string(),
            result
                .report_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ABSENT.to_string()),
            if index == best { "True" } else { "False" }.to_string(),
        ];
        table.push_str(&row.join("\t"));
        table.push('\n');
    }

    let path = outdir.join("results.tsv");
    std::fs::write(&path, table)?;

    info!(path = %path.display(), rows = results.len(), "wrote run summary");
    Ok(())
}
