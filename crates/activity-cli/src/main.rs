//! Activity sheet converter CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use activity_cli::logging::{LogConfig, LogFormat, init_logging};
use activity_cli::summary::print_summary;

mod cli;
mod commands;

use crate::cli::{Cli, Command, ConfigCommand, LogFormatArg, LogLevelArg};
use crate::commands::{run_config_reset, run_config_save, run_config_show, run_convert};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Convert(args) => run_convert(args, &cli.config).map(|result| {
            print_summary(&result);
            result.has_errors
        }),
        Command::Config(ConfigCommand::Show) => run_config_show(&cli.config).map(|()| false),
        Command::Config(ConfigCommand::Reset) => run_config_reset(&cli.config).map(|()| false),
        Command::Config(ConfigCommand::Save(source)) => {
            run_config_save(source, &cli.config).map(|()| false)
        }
    };
    let exit_code = match result {
        Ok(has_errors) => i32::from(has_errors),
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
