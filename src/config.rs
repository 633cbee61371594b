//! Configuration module for `grade-report`

use crate::core::models::SortOrder;
use crate::core::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the configuration directory
const DIR_VARIABLE: &str = "$GRADE_REPORT";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Outgoing mail configuration
///
/// The SMTP password is never stored here; `password_env` names the
/// environment variable that holds it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay host
    #[serde(default)]
    pub host: String,
    /// Relay port (STARTTLS)
    #[serde(default)]
    pub port: u16,
    /// Default sender address
    #[serde(default)]
    pub sender: String,
    /// Name of the environment variable holding the SMTP password
    #[serde(default)]
    pub password_env: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for saved report files
    #[serde(default)]
    pub reports_dir: String,
}

/// Report rendering defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Transcript ordering
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Output format for saved reports
    #[serde(default)]
    pub format: ReportFormat,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// SMTP settings
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override SMTP host
    pub smtp_host: Option<String>,
    /// Override SMTP port
    pub smtp_port: Option<u16>,
    /// Override sender address
    pub sender: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$GRADE_REPORT` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gradereport`
    /// - macOS: `~/Library/Application Support/gradereport`
    /// - Windows: `%APPDATA%\gradereport`
    #[must_use]
    pub fn get_gradereport_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradereport")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading so that fields added in newer releases get their
    /// default values. Only fields that are empty here and non-empty in
    /// `defaults` are updated.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.smtp.host.is_empty() && !defaults.smtp.host.is_empty() {
            self.smtp.host.clone_from(&defaults.smtp.host);
            changed = true;
        }
        if self.smtp.port == 0 && defaults.smtp.port != 0 {
            self.smtp.port = defaults.smtp.port;
            changed = true;
        }
        if self.smtp.sender.is_empty() && !defaults.smtp.sender.is_empty() {
            self.smtp.sender.clone_from(&defaults.smtp.sender);
            changed = true;
        }
        if self.smtp.password_env.is_empty() && !defaults.smtp.password_env.is_empty() {
            self.smtp.password_env.clone_from(&defaults.smtp.password_env);
            changed = true;
        }

        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the configuration file is not touched.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(host) = &overrides.smtp_host {
            self.smtp.host.clone_from(host);
        }
        if let Some(port) = overrides.smtp_port {
            self.smtp.port = port;
        }
        if let Some(sender) = &overrides.sender {
            self.smtp.sender.clone_from(sender);
        }

        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_gradereport_dir`](Self::get_gradereport_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gradereport_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GRADE_REPORT` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gradereport_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$GRADE_REPORT` in path values. Missing fields use their serde
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from
    ///   defaults and saves the result if anything was added
    /// - On first run: creates the config directory and writes the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();

            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created, or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `host`, `port`, `sender`,
    /// `password_env`, `reports_dir`, `sort_order`, `format`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "host" => Some(self.smtp.host.clone()),
            "port" => Some(self.smtp.port.to_string()),
            "sender" => Some(self.smtp.sender.clone()),
            "password_env" | "password-env" => Some(self.smtp.password_env.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "sort_order" | "sort-order" => Some(self.report.sort_order.to_string()),
            "format" => Some(self.report.format.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to
    /// persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "host" => self.smtp.host = value.to_string(),
            "port" => {
                self.smtp.port = value
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid port value: '{value}'"))?;
            }
            "sender" => self.smtp.sender = value.to_string(),
            "password_env" | "password-env" => self.smtp.password_env = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "sort_order" | "sort-order" => self.report.sort_order = value.parse()?,
            "format" => self.report.format = value.parse()?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "host" => self.smtp.host.clone_from(&defaults.smtp.host),
            "port" => self.smtp.port = defaults.smtp.port,
            "sender" => self.smtp.sender.clone_from(&defaults.smtp.sender),
            "password_env" | "password-env" => self
                .smtp
                .password_env
                .clone_from(&defaults.smtp.password_env),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "sort_order" | "sort-order" => self.report.sort_order = defaults.report.sort_order,
            "format" => self.report.format = defaults.report.format,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[smtp]")?;
        writeln!(f, "  host = \"{}\"", self.smtp.host)?;
        writeln!(f, "  port = {}", self.smtp.port)?;
        writeln!(f, "  sender = \"{}\"", self.smtp.sender)?;
        writeln!(f, "  password_env = \"{}\"", self.smtp.password_env)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[report]")?;
        writeln!(f, "  sort_order = \"{}\"", self.report.sort_order)?;
        writeln!(f, "  format = \"{}\"", self.report.format)?;

        Ok(())
    }
}
