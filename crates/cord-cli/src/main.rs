//! CORD-19 metadata analyzer CLI.

use clap::Parser;
use tracing::level_filters::LevelFilter;

use cord_cli::cache::ResultCache;
use cord_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use cord_cli::commands::{run_analyze, run_columns};
use cord_cli::logging::{LogConfig, LogFormat, init_logging};
use cord_cli::summary::{print_json, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));
    let exit_code = match cli.command {
        Command::Analyze(args) => {
            let mut cache = ResultCache::new();
            match run_analyze(&args, &mut cache) {
                Ok(result) => {
                    let printed = if args.json {
                        print_json(&result)
                    } else {
                        print_summary(&result);
                        Ok(())
                    };
                    match printed {
                        Ok(()) => 0,
                        Err(error) => {
                            eprintln!("error: {error}");
                            1
                        }
                    }
                }
                Err(error) => {
                    eprintln!("error: {error}");
                    1
                }
            }
        }
        Command::Columns => match run_columns() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error}");
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
    config
}
