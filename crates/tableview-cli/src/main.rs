//! Table viewer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tableview_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use crate::commands::{run_filters, run_show};
use tableview_cli::render::{print_filters, print_view};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Show(args) => match run_show(&args) {
            Ok(report) => match args.format {
                OutputFormatArg::Table => {
                    print_view(&report);
                    0
                }
                OutputFormatArg::Json => match serde_json::to_string_pretty(&report) {
                    Ok(json) => {
                        println!("{json}");
                        0
                    }
                    Err(error) => {
                        eprintln!("error: {error}");
                        1
                    }
                },
            },
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Filters(args) => match run_filters(&args) {
            Ok(document) => {
                print_filters(&document.filters);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
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
    config.log_data = cli.log_data;
    config.with_timestamps = cli.log_file.is_some();
    config.with_target = config.level_filter >= LevelFilter::DEBUG;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> LogConfig {
        let cli = Cli::try_parse_from(args).expect("parse arguments");
        log_config_from_cli(&cli)
    }

    #[test]
    fn log_file_gets_timestamps() {
        let cfg = config(&[
            "tableview",
            "--log-file",
            "view.log",
            "filters",
            "--filters",
            "view.toml",
        ]);
        assert!(cfg.with_timestamps);
        assert!(!cfg.with_target);
        assert!(!cfg.with_ansi);
        assert!(cfg.use_env_filter);
    }

    #[test]
    fn debug_verbosity_shows_targets() {
        let cfg = config(&["tableview", "-vv", "filters", "--filters", "view.toml"]);
        assert_eq!(cfg.level_filter, LevelFilter::DEBUG);
        assert!(cfg.with_target);
        assert!(!cfg.with_timestamps);
        assert!(!cfg.use_env_filter);
    }

    #[test]
    fn explicit_level_wins_and_data_logging_is_opt_in() {
        let cfg = config(&[
            "tableview",
            "-q",
            "--log-level",
            "trace",
            "--log-data",
            "filters",
            "--filters",
            "view.toml",
        ]);
        assert_eq!(cfg.level_filter, LevelFilter::TRACE);
        assert!(cfg.log_data);
    }
}
