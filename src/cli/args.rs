//! CLI argument definitions for `grade-report`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use grade_report::config::ConfigOverrides;
use grade_report::core::models::SortOrder;
use grade_report::core::report::ReportFormat;
use grade_report::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Transcript ordering argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum OrderArg {
    /// Lowest score first
    Ascending,
    /// Highest score first
    Descending,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Ascending => Self::Ascending,
            OrderArg::Descending => Self::Descending,
        }
    }
}

/// Report format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// Plaintext with grid tables
    Text,
    /// Markdown
    Markdown,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Markdown => Self::Markdown,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `host`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Render a student's progress report.
    ///
    /// Prints to stdout unless an output file or `--save` is given.
    Report {
        /// Path to the student record (TOML)
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Write the report to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format (defaults to config `format`)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Transcript ordering (defaults to config `sort_order`)
        #[arg(long, value_enum)]
        order: Option<OrderArg>,

        /// Save the report into the configured reports directory
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },
    /// Email a student's plaintext report to a parent.
    ///
    /// The SMTP password is read from the environment variable named by the
    /// `password_env` config key (a `.env` file is honoured).
    Send {
        /// Path to the student record (TOML)
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Parent email address
        #[arg(long, value_name = "EMAIL")]
        parent: String,

        /// Sender address (defaults to config `sender`)
        #[arg(long, value_name = "EMAIL")]
        sender: Option<String>,

        /// Transcript ordering (defaults to config `sort_order`)
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradereport",
    about = "Student progress reports with weighted grading and attendance",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override SMTP relay host
    #[arg(long = "smtp-host", value_name = "HOST")]
    pub smtp_host: Option<String>,

    /// Override SMTP relay port
    #[arg(long = "smtp-port", value_name = "PORT")]
    pub smtp_port: Option<u16>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. `send --sender` overrides the configured
    /// sender address for this run.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            sender: match &self.command {
                Command::Send { sender, .. } => sender.clone(),
                _ => None,
            },
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            smtp_host: None,
            smtp_port: None,
            reports_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_order_and_format_conversion() {
        assert_eq!(SortOrder::from(OrderArg::Descending), SortOrder::Descending);
        assert_eq!(ReportFormat::from(FormatArg::Markdown), ReportFormat::Markdown);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.smtp_host.is_none());
        assert!(overrides.smtp_port.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut cli = bare_cli(Command::Config { subcommand: None });
        cli.config_level = Some(LogLevelArg::Debug);
        cli.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        cli.config_verbose = Some(true);
        cli.smtp_host = Some("smtp.example.com".to_string());
        cli.smtp_port = Some(2525);
        cli.reports_dir = Some(PathBuf::from("/reports"));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.smtp_host, Some("smtp.example.com".to_string()));
        assert_eq!(overrides.smtp_port, Some(2525));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
    }

    #[test]
    fn test_parse_send_command() {
        let cli = Cli::try_parse_from([
            "gradereport",
            "send",
            "student.toml",
            "--parent",
            "parent@example.com",
            "--order",
            "descending",
        ])
        .expect("send should parse");

        assert!(cli.to_config_overrides().sender.is_none());

        match cli.command {
            Command::Send {
                parent, order, sender, ..
            } => {
                assert_eq!(parent, "parent@example.com");
                assert_eq!(order, Some(OrderArg::Descending));
                assert!(sender.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_send_sender_becomes_override() {
        let cli = Cli::try_parse_from([
            "gradereport",
            "send",
            "student.toml",
            "--parent",
            "parent@example.com",
            "--sender",
            "teacher@example.com",
        ])
        .expect("send should parse");

        assert_eq!(
            cli.to_config_overrides().sender,
            Some("teacher@example.com".to_string())
        );
    }

    #[test]
    fn test_save_conflicts_with_output() {
        let result = Cli::try_parse_from([
            "gradereport",
            "report",
            "student.toml",
            "--save",
            "--output",
            "out.txt",
        ]);
        assert!(result.is_err());
    }
}
