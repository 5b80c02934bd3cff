//! Parsing of BUSCO's `short_summary.txt` report.

use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Extract the "Complete" percentage from a short-summary report.
///
/// Scans the report line by line, trimming surrounding whitespace and
/// skipping blank lines and `#`/`*` comment lines. The first line starting
/// with `C:` wins. A report without any `C:` line yields `Ok(None)` --
/// callers must handle the missing score.
pub fn read_complete_score(report: &Path) -> Result<Option<f64>> {
    let file = File::open(report)?;

    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with('*') {
            continue;
        }

        if line.starts_with("C:") {
            let score = parse_complete_line(line);
            debug!(report = %report.display(), score = ?score, "parsed completeness line");
            return Ok(score);
        }
    }

    Ok(None)
}

/// Parse a `C:<float>%[S:<float>%,D:<float>%]` line into its leading score.
fn parse_complete_line(line: &str) -> Option<f64> {
    // flatten the bracketed sub-scores into one comma-delimited list
    let line = line.replace('%', "").replace('[', ",").replace(']', "");
    let first = line.split(',').next()?;
    first.split(':').nth(1)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_report(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short_summary.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn parses_complete_percentage() {
        let (_dir, path) = write_report("C:87.3%[S:80.1%,D:7.2%]\n");
        let score = read_complete_score(&path).unwrap();
        assert_eq!(score, Some(87.3));
    }

    #[test]
    fn parses_full_busco_summary_line() {
        let (_dir, path) = write_report("C:98.5%[S:97.9%,D:0.6%],F:0.5%,M:1.0%,n:255\n");
        let score = read_complete_score(&path).unwrap();
        assert_eq!(score, Some(98.5));
    }

    #[test]
    fn comment_and_blank_lines_do_not_affect_the_value() {
        let report = "\
# BUSCO version is: 5.4.7
# The lineage dataset is: bacteria_odb10

***** Results: *****

\tC:87.3%[S:80.1%,D:7.2%]
";
        let (_dir, path) = write_report(report);
        let score = read_complete_score(&path).unwrap();
        assert_eq!(score, Some(87.3));
    }

    #[test]
    fn comment_only_report_yields_no_value() {
        let (_dir, path) = write_report("# header\n* banner\n\n");
        let score = read_complete_score(&path).unwrap();
        assert_eq!(score, None);
    }

    #[test]
    fn first_complete_line_wins() {
        let (_dir, path) = write_report("C:10.0%[S:9.0%,D:1.0%]\nC:99.0%[S:98.0%,D:1.0%]\n");
        let score = read_complete_score(&path).unwrap();
        assert_eq!(score, Some(10.0));
    }

    #[test]
    fn missing_report_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = read_complete_score(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(crate::BuscoError::Io(_))));
    }

    #[test]
    fn parse_helper_handles_bracketed_layout() {
        assert_eq!(parse_complete_line("C:87.3%[S:80.1%,D:7.2%]"), Some(87.3));
        assert_eq!(parse_complete_line("C:0.0%[S:0.0%,D:0.0%]"), Some(0.0));
    }

    #[test]
    fn parse_helper_rejects_garbage() {
        assert_eq!(parse_complete_line("C:not-a-number%[]"), None);
    }
}
