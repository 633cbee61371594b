//! Report format implementations
//!
//! Provides renderers for the supported report formats: plaintext and Markdown.

pub mod markdown;
pub mod text;

pub use markdown::MarkdownReporter;
pub use text::TextReporter;

use super::{ReportContext, ReportGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plaintext with grid tables (the emailed format)
    #[default]
    Text,
    /// Markdown with pipe tables
    Markdown,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }

    /// Render a context with the reporter for this format
    #[must_use]
    pub fn render(self, ctx: &ReportContext) -> String {
        self.reporter().render(ctx)
    }

    /// Reporter implementing this format
    #[must_use]
    pub fn reporter(self) -> Box<dyn ReportGenerator> {
        match self {
            Self::Text => Box::new(TextReporter::new()),
            Self::Markdown => Box::new(MarkdownReporter::new()),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Self::Text),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("txt".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!("Markdown".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ReportFormat::Text.extension(), "txt");
        assert_eq!(ReportFormat::Markdown.extension(), "md");
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
    }
}
