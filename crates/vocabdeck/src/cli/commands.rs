//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::ListFormat;
use crate::language::Language;

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Language to add the word to (English, French or German)
    #[arg(value_parser = parse_language)]
    pub language: Language,

    /// The word
    pub word: String,

    /// What the word means
    pub meaning: String,
}

/// Dictionary command arguments.
#[derive(Debug, Args)]
pub struct DictCommand {
    /// Language to list (English, French or German)
    #[arg(value_parser = parse_language)]
    pub language: Language,

    /// Only show entries whose word or meaning contains this text (case-sensitive)
    pub search: Option<String>,

    /// Output format (defaults to `dictionary.default_format`)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Study command arguments.
#[derive(Debug, Args)]
pub struct StudyCommand {
    /// Language to study (defaults to `study.default_language`)
    #[arg(value_parser = parse_language)]
    pub language: Option<Language>,

    /// Start on a random card
    #[arg(short, long)]
    pub shuffle: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Parse a language name case-insensitively, as the study shell does.
fn parse_language(value: &str) -> Result<Language, String> {
    value.parse().map_err(|e: crate::error::Error| e.to_string())
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `word - meaning` lines
    #[default]
    Plain,
    /// Aligned columns
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormat> for ListFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Plain => Self::Plain,
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_ignores_case() {
        assert_eq!(parse_language("french"), Ok(Language::French));
        assert_eq!(parse_language("German"), Ok(Language::German));
    }

    #[test]
    fn test_parse_language_lists_choices() {
        let message = parse_language("Spanish").unwrap_err();
        assert!(message.contains("Spanish"));
        assert!(message.contains("English, French, German"));
    }

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(ListFormat::from(OutputFormat::Plain), ListFormat::Plain);
        assert_eq!(ListFormat::from(OutputFormat::Table), ListFormat::Table);
        assert_eq!(ListFormat::from(OutputFormat::Json), ListFormat::Json);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            language: Language::French,
            word: "chat".to_string(),
            meaning: "cat".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("chat"));
        assert!(debug_str.contains("French"));
    }
}
