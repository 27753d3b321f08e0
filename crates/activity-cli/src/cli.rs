//! CLI argument definitions for the activity sheet converter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use activity_cli::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(
    name = "activity-sheets",
    version,
    about = "Convert activity sheets into the app's activities JSON",
    long_about = "Convert activity sheets into the app's activities JSON.\n\n\
                  Reads a local CSV file or the Experiences, Financial and Quotes\n\
                  tabs of a public spreadsheet, validates and normalizes every row,\n\
                  and writes one JSON document with metadata."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Settings file.
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH,
        global = true
    )]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a CSV file or spreadsheet into activities JSON.
    Convert(ConvertArgs),

    /// Show, save, or reset the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Where rows come from. Flags here override the settings file.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Spreadsheet URL (or bare sheet id) to read from.
    #[arg(long = "sheet-url", value_name = "URL")]
    pub sheet_url: Option<String>,

    /// GID of the Experiences tab.
    #[arg(long = "experiences-tab", value_name = "GID")]
    pub experiences_tab: Option<String>,

    /// GID of the Financial tab.
    #[arg(long = "financial-tab", value_name = "GID")]
    pub financial_tab: Option<String>,

    /// GID of the Quotes tab.
    #[arg(long = "quotes-tab", value_name = "GID")]
    pub quotes_tab: Option<String>,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Local CSV file; when omitted the spreadsheet is read instead.
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Write default-activities.json instead of the import file.
    #[arg(long = "replace-default")]
    pub replace_default: bool,

    /// Output file name (default from settings, then imported-activities.json).
    #[arg(long = "filename", value_name = "NAME")]
    pub filename: Option<String>,

    /// Output directory (default from settings, then src/data/activities/).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the JSON instead of writing it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Overwrite an existing output file without a backup.
    #[arg(long = "no-backup")]
    pub no_backup: bool,

    /// Do not read the Financial tab.
    #[arg(long = "skip-financial")]
    pub skip_financial: bool,

    /// Do not read the Quotes tab.
    #[arg(long = "skip-quotes")]
    pub skip_quotes: bool,

    /// Save the sheet URL and tab GIDs to the settings file.
    #[arg(long = "save-config")]
    pub save_config: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings.
    Show,

    /// Delete the settings file.
    Reset,

    /// Save sheet URL and tab GIDs.
    Save(SourceArgs),
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
