//! CLI for LLM Leaderboard.
//!
//! This crate provides the `leaderboard` command-line interface: loading
//! result files, printing leaderboards and pivot tables, validating
//! documents and writing full reports.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use llm_leaderboard_adapters::prelude::*;
use llm_leaderboard_core::{flatten_results, group_by_category, DataSource, RankingSort};
use llm_leaderboard_report::{export, io, markdown, Report, ReportOptions, ScoreScale};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// LLM Leaderboard CLI.
#[derive(Parser, Debug)]
#[command(name = "leaderboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, global = true, env = "LEADERBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where result files come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Results directory (uses its manifest.json when present).
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Individual result files (.json or .jsonl).
    pub files: Vec<PathBuf>,
}

/// Output format for leaderboards.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown tables.
    #[default]
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print per-benchmark leaderboards.
    Rank {
        /// Result files to read.
        #[command(flatten)]
        sources: SourceArgs,

        /// Row order: average or name.
        #[arg(short, long)]
        sort: Option<RankingSort>,

        /// Score rendering: percent or fraction.
        #[arg(long)]
        scale: Option<ScoreScale>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Only show this benchmark.
        #[arg(short, long)]
        benchmark: Option<String>,
    },

    /// Print or save the category × source pivot table as CSV.
    Pivot {
        /// Result files to read.
        #[command(flatten)]
        sources: SourceArgs,

        /// Score rendering: percent or fraction.
        #[arg(long)]
        scale: Option<ScoreScale>,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print per-source averages by subject area.
    Subjects {
        /// Result files to read.
        #[command(flatten)]
        sources: SourceArgs,

        /// Score rendering: percent or fraction.
        #[arg(long)]
        scale: Option<ScoreScale>,

        /// Also list each source's records grouped by subject area.
        #[arg(short, long)]
        records: bool,
    },

    /// Check result documents against the expected layout.
    Validate {
        /// Result files to read.
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Write pivot.csv, pivot.json, rankings.json, runs.json and summary.md.
    Report {
        /// Result files to read.
        #[command(flatten)]
        sources: SourceArgs,

        /// Output directory override.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Row order: average or name.
        #[arg(short, long)]
        sort: Option<RankingSort>,

        /// Score rendering: percent or fraction.
        #[arg(long)]
        scale: Option<ScoreScale>,
    },

    /// Show the resolved configuration.
    Status,
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = LeaderboardConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.log_level, cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &config, &mut out)
}

fn init_tracing(level: &str, verbose: bool) {
    let default = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute a parsed command, writing user-facing output to `out`.
pub fn execute(cli: Cli, config: &LeaderboardConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Rank {
            sources,
            sort,
            scale,
            format,
            benchmark,
        } => {
            let loaded = load_sources(&sources, config)?;
            let options = ReportOptions {
                scale: scale.unwrap_or(config.score_scale),
                sort: sort.unwrap_or(config.sort),
            };
            let mut report = Report::build(&loaded, options);
            if let Some(name) = &benchmark {
                report.rankings.retain(|r| &r.benchmark == name);
                if report.rankings.is_empty() {
                    bail!("benchmark '{}' not found", name);
                }
            }

            match format {
                OutputFormat::Markdown => {
                    for ranking in &report.rankings {
                        writeln!(out, "{}", markdown::generate_ranking_table(ranking, options.scale))?;
                    }
                }
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&report.rankings)?)?;
                }
            }
            Ok(())
        }

        Commands::Pivot {
            sources,
            scale,
            output,
        } => {
            let loaded = load_sources(&sources, config)?;
            let rows = llm_leaderboard_core::build_pivot(&loaded);
            let scale = scale.unwrap_or(config.score_scale);

            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    export::write_pivot_csv(&rows, scale, file)?;
                    writeln!(out, "Wrote {} rows to {}", rows.len(), path.display())?;
                }
                None => export::write_pivot_csv(&rows, scale, &mut *out)?,
            }
            Ok(())
        }

        Commands::Subjects {
            sources,
            scale,
            records,
        } => {
            let loaded = load_sources(&sources, config)?;
            let subjects = llm_leaderboard_core::summarize_subjects(&loaded);
            let scale = scale.unwrap_or(config.score_scale);
            write!(out, "{}", markdown::generate_subject_table(&subjects, scale))?;

            if records {
                for source in &loaded {
                    let groups = group_by_category(&flatten_results(&source.raw_data));
                    writeln!(out)?;
                    write!(out, "{}", markdown::generate_grouped_records(&source.label(), &groups, scale))?;
                }
            }
            Ok(())
        }

        Commands::Validate { sources } => validate(&sources, config, out),

        Commands::Report {
            sources,
            output,
            sort,
            scale,
        } => {
            let loaded = load_sources(&sources, config)?;
            let options = ReportOptions {
                scale: scale.unwrap_or(config.score_scale),
                sort: sort.unwrap_or(config.sort),
            };
            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            let (report, written) = llm_leaderboard_report::build_and_write_all(&loaded, options, &dir)?;

            writeln!(
                out,
                "{} {} sources, {} benchmarks, {} categories",
                "Aggregated".green().bold(),
                report.source_count,
                report.rankings.len(),
                report.pivot.len()
            )?;
            for path in written {
                writeln!(out, "  - {}", path.display())?;
            }
            Ok(())
        }

        Commands::Status => {
            writeln!(out, "LLM Leaderboard")?;
            writeln!(out, "Version: {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "\nConfiguration:")?;
            match &config.results_dir {
                Some(dir) => writeln!(out, "  results_dir: {}", dir.display())?,
                None => writeln!(out, "  results_dir: (not set)")?,
            }
            writeln!(out, "  output_dir:  {}", config.output_dir.display())?;
            writeln!(out, "  score_scale: {}", config.score_scale)?;
            writeln!(out, "  sort:        {}", config.sort)?;
            writeln!(out, "  log_level:   {}", config.log_level)?;
            Ok(())
        }
    }
}

/// Resolve the providers for the given arguments.
///
/// Explicit files and `--dir` combine. The configured results directory is
/// only used when neither is given.
pub fn providers_for(args: &SourceArgs, config: &LeaderboardConfig) -> Vec<Box<dyn SourceProvider>> {
    let mut providers: Vec<Box<dyn SourceProvider>> = Vec::new();

    if let Some(dir) = results_dir(args, config) {
        providers.push(Box::new(DirectoryProvider::new(dir)));
    }
    if !args.files.is_empty() {
        providers.push(Box::new(FileListProvider::new(args.files.iter().cloned())));
    }
    providers
}

/// The results directory to read: `--dir`, else the configured one when no
/// files were given.
fn results_dir(args: &SourceArgs, config: &LeaderboardConfig) -> Option<PathBuf> {
    match (&args.dir, args.files.is_empty()) {
        (Some(dir), _) => Some(dir.clone()),
        (None, true) => config.results_dir.clone(),
        (None, false) => None,
    }
}

fn load_sources(args: &SourceArgs, config: &LeaderboardConfig) -> anyhow::Result<Vec<DataSource>> {
    let providers = providers_for(args, config);
    if providers.is_empty() {
        bail!("no result files given; pass files, --dir, or set results_dir");
    }
    let sources = load_all(&providers).context("loading result files")?;
    debug!(sources = sources.len(), "Sources loaded");
    Ok(sources)
}

fn validate(args: &SourceArgs, config: &LeaderboardConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut paths = Vec::new();
    if let Some(dir) = results_dir(args, config) {
        let provider = DirectoryProvider::new(&dir);
        paths.extend(
            provider
                .result_paths()
                .with_context(|| format!("resolving result files in {}", dir.display()))?,
        );
    }
    paths.extend(args.files.iter().cloned());
    if paths.is_empty() {
        bail!("no result files given; pass files, --dir, or set results_dir");
    }

    let validator = SchemaValidator::new();
    let mut failures = 0;
    for path in &paths {
        let doc = match io::read_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                failures += 1;
                writeln!(out, "{} {}: {}", "✗".red(), path.display(), e)?;
                continue;
            }
        };

        let result = validator.validate_document(&doc);
        let marker = if result.is_valid { "✓".green() } else { "✗".red() };
        writeln!(
            out,
            "{} {} ({} datasets, {} usable results)",
            marker,
            path.display(),
            result.datasets,
            result.valid_results
        )?;
        for error in &result.errors {
            writeln!(out, "    error [{}]: {}", error.code, error.message)?;
        }
        for warning in &result.warnings {
            warn!(path = %path.display(), "{}", warning);
            writeln!(out, "    warning: {}", warning)?;
        }
        if !result.is_valid {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} documents failed validation", failures, paths.len());
    }
    Ok(())
}
