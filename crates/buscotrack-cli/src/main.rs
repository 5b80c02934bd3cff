//! buscotrack - track BUSCO completeness across assembly improvement rounds
//!
//! ## Commands
//!
//! - `run`: evaluate one assembly against one lineage database
//! - `score`: extract the Complete percentage from an existing report
//! - `sweep`: evaluate one assembly against several lineages and keep the best

use anyhow::{Context, Result};
use buscotrack_core::{read_complete_score, write_summary, BuscoResult, BuscoRunner};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "buscotrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "BUSCO completeness tracking for genome assemblies", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run BUSCO once and print the scored record
    Run {
        /// Genome assembly to evaluate (FASTA)
        #[arg(short, long)]
        assembly: String,

        /// Output directory for the run
        #[arg(short, long)]
        outdir: PathBuf,

        /// Lineage database to score against
        #[arg(short, long)]
        lineage: String,

        /// BUSCO executable to invoke
        #[arg(long, env = "BUSCO_EXE", default_value = "busco")]
        program: String,

        /// Worker-count hint passed to BUSCO
        #[arg(long, env = "BUSCO_CPU", default_value_t = 30)]
        cpu: u32,

        /// Print the record as JSON instead of text
        #[arg(long)]
        json_output: bool,
    },

    /// Extract the Complete percentage from an existing short_summary.txt
    Score {
        /// Path to the report file
        report: PathBuf,
    },

    /// Evaluate one assembly against several lineages and keep the best
    Sweep {
        /// Genome assembly to evaluate (FASTA)
        #[arg(short, long)]
        assembly: String,

        /// Directory receiving one run subdirectory per lineage plus results.tsv
        #[arg(short, long)]
        outdir: PathBuf,

        /// Comma-separated lineage databases (e.g. bacteria_odb10,rhizobiales_odb10)
        #[arg(short, long)]
        lineages: String,

        /// BUSCO executable to invoke
        #[arg(long, env = "BUSCO_EXE", default_value = "busco")]
        program: String,

        /// Worker-count hint passed to BUSCO
        #[arg(long, env = "BUSCO_CPU", default_value_t = 30)]
        cpu: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    buscotrack_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Run {
            assembly,
            outdir,
            lineage,
            program,
            cpu,
            json_output,
        } => cmd_run(&assembly, &outdir, &lineage, &program, cpu, json_output),
        Commands::Score { report } => cmd_score(&report),
        Commands::Sweep {
            assembly,
            outdir,
            lineages,
            program,
            cpu,
        } => cmd_sweep(&assembly, &outdir, &lineages, &program, cpu),
    }
}

/// Run BUSCO once and print the scored record
fn cmd_run(
    assembly: &str,
    outdir: &Path,
    lineage: &str,
    program: &str,
    cpu: u32,
    json_output: bool,
) -> Result<()> {
    let runner = BuscoRunner::new(program).with_cpus(cpu);

    let result = runner
        .run(assembly, outdir, lineage)
        .with_context(|| format!("busco run failed for {}", assembly))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_record(&result);
    }

    Ok(())
}

/// Extract and print the score from an existing report
fn cmd_score(report: &Path) -> Result<()> {
    let score = read_complete_score(report)
        .with_context(|| format!("failed to read report {:?}", report))?;

    match score {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => anyhow::bail!("no completeness line found in {:?}", report),
    }
}

/// Evaluate one assembly against several lineages, keep the best, and
/// write the run history
fn cmd_sweep(
    assembly: &str,
    outdir: &Path,
    lineages_str: &str,
    program: &str,
    cpu: u32,
) -> Result<()> {
    let lineages = parse_lineages(lineages_str);
    if lineages.is_empty() {
        anyhow::bail!("no lineages given");
    }

    std::fs::create_dir_all(outdir)
        .with_context(|| format!("failed to create output directory {:?}", outdir))?;

    let runner = BuscoRunner::new(program).with_cpus(cpu);

    // seed with the unevaluated assembly; the first scored run replaces it
    let mut best: BuscoResult = assembly.into();
    let mut best_index = 0;
    let mut history = Vec::new();

    for (index, lineage) in lineages.iter().enumerate() {
        let run_dir = outdir.join(lineage);

        let result = runner
            .run(assembly, &run_dir, lineage)
            .with_context(|| format!("busco run failed for lineage {}", lineage))?;

        if best.is_first() || result.improves_on(&best) {
            best = result.clone();
            best_index = index;
        }

        history.push(result);
    }

    write_summary(outdir, best_index, &history).context("failed to write results.tsv")?;

    println!("Sweep complete for {}", assembly);
    for (index, result) in history.iter().enumerate() {
        let marker = if index == best_index { "*" } else { " " };
        println!(
            "  {} {} {}",
            marker,
            result.lineage.as_deref().unwrap_or("-"),
            result.score
        );
    }
    println!();
    println!(
        "Best lineage: {} ({})",
        best.lineage.as_deref().unwrap_or("-"),
        best.score
    );
    println!("Summary written to {:?}", outdir.join("results.tsv"));

    Ok(())
}

fn print_record(result: &BuscoResult) {
    println!("Assembly: {}", result.assembly);
    println!("Score:    {}", result.score);
    if let Some(lineage) = &result.lineage {
        println!("Lineage:  {}", lineage);
    }
    if let Some(dir) = &result.report_dir {
        println!("Report:   {}", dir.display());
    }
}

/// Split a comma-separated lineage list, dropping empty entries
fn parse_lineages(lineages: &str) -> Vec<String> {
    lineages
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
