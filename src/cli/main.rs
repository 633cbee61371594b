//! Command-line interface entry point for `grade-report`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::report::Destination;
use grade_report::config::Config;
use grade_report::info;
use grade_report::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    // Pull SMTP credentials and other settings from a local .env, if present
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Report {
            input_file,
            output,
            format,
            order,
            save,
        } => {
            let format = format.map_or(config.report.format, Into::into);
            let order = order.map_or(config.report.sort_order, Into::into);

            let destination = if let Some(path) = output {
                Destination::File(path)
            } else if save {
                match commands::report::default_output_path(&input_file, format, &config) {
                    Ok(path) => Destination::File(path),
                    Err(e) => {
                        eprintln!("{e}");
                        std::process::exit(1);
                    }
                }
            } else {
                Destination::Stdout
            };

            commands::report::run(&input_file, &destination, format, order);
        }
        Command::Send {
            input_file,
            parent,
            order,
            ..
        } => {
            let order = order.map_or(config.report.sort_order, Into::into);
            commands::send::run(&input_file, &parent, order, &config);
        }
    }
}
