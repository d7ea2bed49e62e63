//! CLI argument definitions for the CRM importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use crm_core::{DEFAULT_BATCH_SIZE, DuplicateStrategy};
use crm_map::DEFAULT_MIN_CONFIDENCE;
use crm_model::ImportTarget;

#[derive(Parser)]
#[command(
    name = "crm-importer",
    version,
    about = "CRM Importer - Bulk-load contacts, leads, and companies from CSV",
    long_about = "Bulk-load CRM records from CSV files.\n\n\
                  Proposes a column-to-field mapping for review, validates rows\n\
                  before import, and de-duplicates records by email."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level values (emails, phone numbers) in logs and reports.
    ///
    /// By default offending values are shown redacted. Enable only when
    /// the output stays on a machine allowed to hold the uploaded data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a CSV file into a target record type.
    Import(ImportArgs),

    /// List import targets and their field catalogs.
    Targets,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the CSV file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Record type to import into.
    #[arg(long = "target", value_enum)]
    pub target: TargetArg,

    /// JSON store file records are written to (created on first use).
    #[arg(long = "store", value_name = "PATH", default_value = "crm-store.json")]
    pub store: PathBuf,

    /// Propose the mapping and validate rows without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Rows written per batch.
    #[arg(long = "batch-size", value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Minimum confidence for an automatic mapping (exclusive).
    #[arg(
        long = "min-confidence",
        value_name = "SCORE",
        default_value_t = DEFAULT_MIN_CONFIDENCE
    )]
    pub min_confidence: f32,

    /// What to do when a row matches an existing record by email.
    #[arg(long = "on-duplicate", value_enum, default_value = "skip")]
    pub on_duplicate: DuplicateArg,
}

/// CLI import target choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum TargetArg {
    Contacts,
    Leads,
    Companies,
}

impl From<TargetArg> for ImportTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Contacts => ImportTarget::Contacts,
            TargetArg::Leads => ImportTarget::Leads,
            TargetArg::Companies => ImportTarget::Companies,
        }
    }
}

/// CLI duplicate-handling choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicateArg {
    Skip,
    Update,
}

impl From<DuplicateArg> for DuplicateStrategy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Skip => DuplicateStrategy::Skip,
            DuplicateArg::Update => DuplicateStrategy::Update,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
