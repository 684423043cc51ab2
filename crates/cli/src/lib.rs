use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use ies_engine::{Directive, OverrideEngine};
use ies_table::{load_table, write_template, OverrideTable};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::archive::ArchiveSink;
use crate::batch::{run_batch, BatchOptions};
use crate::config::AppConfig;
use crate::flags::CompressionFlag;
use crate::inputs::collect_inputs;

mod archive;
mod batch;
mod config;
mod flags;
mod inputs;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "ies-batch")]
#[command(about = "Batch-edit IES photometric files from an override table", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ./ies-batch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite IES files per the override table and pack them into a zip
    Apply(ApplyArgs),

    /// Write a starter override table (CSV)
    Template(TemplateArgs),

    /// Show the overrides parsed from a table
    Inspect(InspectArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Override table (.csv, .xlsx, .xls, .ods, ...)
    #[arg(short, long)]
    table: PathBuf,

    /// Output archive (default: archive_name from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Record files that fail to decode and continue with the rest
    #[arg(long)]
    keep_going: bool,

    /// Descend into subdirectories of directory inputs
    #[arg(short, long)]
    recursive: bool,

    /// Archive compression
    #[arg(long, value_enum, default_value_t = CompressionFlag::Deflated)]
    compression: CompressionFlag,

    /// Output run report as JSON
    #[arg(long)]
    json: bool,

    /// IES files or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Args)]
struct TemplateArgs {
    /// Destination CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InspectArgs {
    /// Override table to parse
    #[arg(short, long)]
    table: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // keep stdout clean for JSON / CSV output
    let machine_output = match &cli.command {
        Commands::Apply(args) => args.json,
        Commands::Inspect(args) => args.json,
        Commands::Template(args) => args.output.is_none(),
    };
    if machine_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let cwd = env::current_dir().context("Failed to resolve working directory")?;
    let (config, config_path) = AppConfig::load(cli.config.as_deref(), &cwd)?;
    if let Some(path) = &config_path {
        log::debug!("Using config {}", path.display());
    }

    match cli.command {
        Commands::Apply(args) => run_apply(args, &config, &cwd)?,
        Commands::Template(args) => run_template(args)?,
        Commands::Inspect(args) => run_inspect(args, &config)?,
    }

    Ok(())
}

fn load_overrides(path: &Path, config: &AppConfig) -> Result<OverrideTable> {
    let engine_config = config.engine_config()?;
    load_table(path, config.table_options(), engine_config.fallback)
        .with_context(|| format!("Failed to load override table {}", path.display()))
}

fn run_apply(args: ApplyArgs, config: &AppConfig, cwd: &Path) -> Result<()> {
    let engine = OverrideEngine::new(config.engine_config()?);
    let table = load_overrides(&args.table, config)?;
    log::info!(
        "Loaded {} override row(s) keyed by '{}'",
        table.len(),
        table.key_column()
    );

    let inputs = collect_inputs(&args.inputs, &config.extensions, args.recursive)?;
    if inputs.is_empty() {
        log::warn!("No input files found");
    }

    let mut sink = ArchiveSink::new(args.compression.as_method());
    let mut report = run_batch(
        &inputs,
        &table,
        &engine,
        &mut sink,
        BatchOptions {
            keep_going: args.keep_going,
        },
    )?;

    let archive_path = args
        .output
        .unwrap_or_else(|| cwd.join(&config.archive_name));
    if sink.is_empty() {
        log::warn!("No input matched the override table; writing an empty archive");
    } else {
        log::debug!(
            "Archive entries ({}): {}",
            sink.len(),
            sink.entry_names().collect::<Vec<_>>().join(", ")
        );
    }
    sink.write_file(&archive_path)?;
    report.archive = Some(archive_path.display().to_string());

    if !report.is_clean() {
        log::warn!(
            "{} failed input(s), {} overwritten archive entr(ies)",
            report.failed.len(),
            report.replaced_entries.len()
        );
    }

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    } else {
        print_stdout(&report::render_summary(&report))?;
    }
    Ok(())
}

fn run_template(args: TemplateArgs) -> Result<()> {
    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_template(BufWriter::new(file))
                .with_context(|| format!("Failed to write template {}", path.display()))?;
            log::info!("Template written to {}", path.display());
        }
        None => {
            write_template(io::stdout().lock()).context("Failed to write template")?;
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs, config: &AppConfig) -> Result<()> {
    let table = load_overrides(&args.table, config)?;

    if args.json {
        return print_stdout(&serde_json::to_string_pretty(&table)?);
    }

    let mut out = format!(
        "{} row(s), key column '{}', {} tag column(s)\n",
        table.len(),
        table.key_column(),
        table.tags().len()
    );
    for row in table.rows() {
        out.push_str(&format!("\n{}\n", row.file_name));
        for (tag, directive) in row.overrides.iter() {
            let action = match directive {
                Directive::Remove => "remove".to_string(),
                Directive::Keep => "keep".to_string(),
                Directive::Replace(value) => format!("set \"{value}\""),
            };
            out.push_str(&format!("  {tag:<16} {action}\n"));
        }
    }
    print_stdout(out.trim_end())
}
