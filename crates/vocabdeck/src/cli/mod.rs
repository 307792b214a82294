//! Command-line interface for vocabdeck.
//!
//! This module provides the CLI structure for the `vocab` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DictCommand, OutputFormat, StatusCommand, StudyCommand,
};

/// vocab - Flashcard vocabulary trainer
///
/// Add word/meaning pairs per language, drill them as flashcards, and browse
/// a searchable dictionary.
#[derive(Debug, Parser)]
#[command(name = "vocab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a word to a language
    Add(AddCommand),

    /// List a language's words, sorted and optionally filtered
    #[command(alias = "dictionary")]
    Dict(DictCommand),

    /// Start the interactive study shell
    Study(StudyCommand),

    /// Show word counts and storage details
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
