//! Invocation of the external BUSCO tool.
//!
//! [`BuscoRunner`] executes `busco -m genome` as a blocking subprocess,
//! relocates the output directory when the caller asked for a nested path,
//! locates the produced `short_summary.txt` and packages everything as a
//! [`BuscoResult`].
//!
//! BUSCO writes its output under the run name in the current working
//! directory, so two concurrent runs sharing a working directory and run
//! name would collide. Nothing here coordinates parallel runs.

use crate::error::BuscoError;
use crate::report::read_complete_score;
use crate::result::BuscoResult;
use crate::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Default worker-count hint passed to the tool.
const DEFAULT_CPUS: u32 = 30;

/// Runs BUSCO in genome mode and packages the outcome as a [`BuscoResult`].
///
/// The executable is configurable so tests can substitute a stand-in
/// program for the real tool.
pub struct BuscoRunner {
    program: String,
    cpus: u32,
}

impl Default for BuscoRunner {
    fn default() -> Self {
        Self::new("busco")
    }
}

impl BuscoRunner {
    /// Create a runner for the given executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cpus: DEFAULT_CPUS,
        }
    }

    /// Create a runner from environment variables.
    ///
    /// Honors `BUSCO_EXE` (executable name) and `BUSCO_CPU` (worker-count
    /// hint) overrides.
    pub fn from_env() -> Self {
        let program = std::env::var("BUSCO_EXE").unwrap_or_else(|_| "busco".to_string());
        let cpus = std::env::var("BUSCO_CPU")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CPUS);
        Self { program, cpus }
    }

    /// Set the worker-count hint.
    pub fn with_cpus(mut self, cpus: u32) -> Self {
        self.cpus = cpus;
        self
    }

    /// Evaluate `assembly` against `lineage`, leaving the report under
    /// `outdir`.
    ///
    /// Blocks until the tool exits; there is no timeout. A non-zero exit
    /// status is tolerated as long as a report shows up -- the run fails
    /// with [`BuscoError::SummaryNotFound`] only when no
    /// `<outdir>/*/short_summary.txt` exists afterwards. A failed or
    /// partial run leaves its filesystem artifacts in place.
    pub fn run(&self, assembly: &str, outdir: &Path, lineage: &str) -> Result<BuscoResult> {
        // busco rejects path separators in -o, so only the final segment
        // goes there; the output is moved into place afterwards
        let run_name = short_run_name(outdir);

        info!(
            assembly = %assembly,
            lineage = %lineage,
            outdir = %outdir.display(),
            "running busco"
        );

        let status = Command::new(&self.program)
            .args(["-m", "genome", "-i", assembly, "-o", &run_name])
            .args(["-l", lineage, "--cpu", &self.cpus.to_string()])
            .status()
            .map_err(|source| BuscoError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            warn!(assembly = %assembly, status = %status, "busco exited with non-zero status");
        }

        if is_nested(outdir) {
            relocate_output(Path::new(&run_name), outdir);
        }

        let summary = find_short_summary(outdir)
            .ok_or_else(|| BuscoError::SummaryNotFound(assembly.to_string()))?;

        let score = read_complete_score(&summary)?
            .ok_or_else(|| BuscoError::ScoreMissing(summary.clone()))?;

        info!(assembly = %assembly, score = score, "busco run scored");

        Ok(BuscoResult {
            assembly: assembly.to_string(),
            score,
            report_dir: Some(outdir.to_path_buf()),
            lineage: Some(lineage.to_string()),
        })
    }
}

/// Final path segment of the output directory.
fn short_run_name(outdir: &Path) -> String {
    outdir
        .file_name()
        .unwrap_or(outdir.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Whether the caller asked for a nested output path rather than a bare
/// run name in the working directory.
fn is_nested(outdir: &Path) -> bool {
    outdir
        .parent()
        .map(|p| !p.as_os_str().is_empty())
        .unwrap_or(false)
}

/// Move the tool's working-directory output into the intended location.
///
/// A failed move is logged and otherwise ignored: the report lookup below
/// decides whether the run produced anything usable.
fn relocate_output(src: &Path, outdir: &Path) {
    if let Some(parent) = outdir.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(outdir = %outdir.display(), error = %err, "failed to create output parent");
                return;
            }
        }
    }

    if let Err(err) = std::fs::rename(src, outdir) {
        warn!(
            src = %src.display(),
            outdir = %outdir.display(),
            error = %err,
            "failed to relocate busco output"
        );
    }
}

/// First `<outdir>/*/short_summary.txt`, exactly one directory level down.
fn find_short_summary(outdir: &Path) -> Option<PathBuf> {
    let mut entries: Vec<_> = std::fs::read_dir(outdir)
        .ok()?
        .filter_map(|e| e.ok())
        .collect();

    // directory order is not deterministic, so sort before picking
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let candidate = entry.path().join("short_summary.txt");
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn short_run_name_takes_final_segment() {
        assert_eq!(short_run_name(Path::new("results/round1")), "round1");
        assert_eq!(short_run_name(Path::new("busco_out")), "busco_out");
    }

    #[test]
    fn bare_name_is_not_nested() {
        assert!(!is_nested(Path::new("busco_out")));
    }

    #[test]
    fn subdirectory_path_is_nested() {
        assert!(is_nested(Path::new("results/round1")));
        assert!(is_nested(Path::new("/tmp/busco/round1")));
    }

    #[test]
    fn relocate_moves_directory_into_place() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("round1");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("marker"), b"x").unwrap();

        let dest = dir.path().join("results").join("round1");
        relocate_output(&src, &dest);

        assert!(!src.exists());
        assert!(dest.join("marker").is_file());
    }

    #[test]
    fn relocate_tolerates_missing_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("never_created");
        let dest = dir.path().join("results").join("never_created");

        // must not panic or error; the report lookup reports the failure
        relocate_output(&src, &dest);
        assert!(!dest.exists());
    }

    #[test]
    fn finds_summary_one_level_down() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("run_bacteria_odb10");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("short_summary.txt"), b"C:1.0%[S:1.0%,D:0.0%]\n").unwrap();

        let found = find_short_summary(dir.path()).unwrap();
        assert_eq!(found, nested.join("short_summary.txt"));
    }

    #[test]
    fn ignores_summary_at_top_level() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("short_summary.txt"), b"C:1.0%\n").unwrap();

        assert!(find_short_summary(dir.path()).is_none());
    }

    #[test]
    fn from_env_defaults() {
        // no env manipulation here to keep tests parallel-safe; just check
        // the compiled-in defaults used when the variables are absent
        let runner = BuscoRunner::default();
        assert_eq!(runner.program, "busco");
        assert_eq!(runner.cpus, DEFAULT_CPUS);
    }
}
