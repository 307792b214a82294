//! Interactive study shell.
//!
//! A line-oriented front end for [`App`]: each input line becomes one
//! [`Action`] (or a shell command like `help`), and the current view is
//! redrawn after every change. The shell runs over any `BufRead`/`Write`
//! pair, so it can be scripted in tests.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::app::{Action, App, AppState, Mode, Transition};
use crate::error::Result;
use crate::language::Language;
use crate::vocabulary::Vocabulary;

const HELP: &str = "\
Commands:
  lang <English|French|German>   select a language
  home                           back to language selection
  game | dict | add              switch view
  next (n) | back (b) | shuffle (s)
  answer <text>                  type an answer and reveal the card
  submit                         reveal the card
  search [<term>]                filter the dictionary (empty clears)
  word <text> | meaning <text>   fill in the add form
  save                           add the word to the dictionary
  help | quit";

/// Errors from parsing a shell line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The first word is not a known command.
    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    /// A required argument was not given.
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        /// The command as typed.
        command: &'static str,
        /// What was expected.
        argument: &'static str,
    },

    /// The language name is not supported.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
}

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Dispatch a single action.
    Action(Action),
    /// Type an answer and reveal the card.
    Answer(String),
    /// Print the command list.
    Help,
    /// Leave the shell.
    Quit,
}

/// Parse one line of input. Blank lines yield `None`.
///
/// # Errors
///
/// Returns an error for unknown commands, missing arguments or unknown
/// language names.
pub fn parse(line: &str) -> std::result::Result<Option<ShellCommand>, ParseError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return Ok(None);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (trimmed, ""),
    };

    let parsed = match command.to_ascii_lowercase().as_str() {
        "lang" | "language" => {
            if rest.trim().is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "lang",
                    argument: "a language name",
                });
            }
            let language: Language = rest
                .parse()
                .map_err(|_| ParseError::UnknownLanguage(rest.trim().to_string()))?;
            ShellCommand::Action(Action::SelectLanguage(language))
        }
        "home" => ShellCommand::Action(Action::GoHome),
        "game" => ShellCommand::Action(Action::SwitchMode(Mode::Game)),
        "dict" | "dictionary" => ShellCommand::Action(Action::SwitchMode(Mode::Dictionary)),
        "add" => ShellCommand::Action(Action::SwitchMode(Mode::Add)),
        "next" | "n" => ShellCommand::Action(Action::Next),
        "back" | "b" | "prev" => ShellCommand::Action(Action::Prev),
        "shuffle" | "s" => ShellCommand::Action(Action::Shuffle),
        "submit" => ShellCommand::Action(Action::Submit),
        "answer" => ShellCommand::Answer(rest.to_string()),
        "search" => ShellCommand::Action(Action::SetSearch(rest.to_string())),
        "word" => ShellCommand::Action(Action::SetWord(rest.to_string())),
        "meaning" => ShellCommand::Action(Action::SetMeaning(rest.to_string())),
        "save" => ShellCommand::Action(Action::AddWord),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        _ => return Err(ParseError::UnknownCommand(command.to_string())),
    };

    Ok(Some(parsed))
}

/// Render the current view as text.
#[must_use]
pub fn render(state: &AppState, vocabulary: &Vocabulary) -> String {
    let mut out = String::new();

    let Some(language) = state.language() else {
        out.push_str("Select language\n");
        for language in Language::ALL {
            let count = vocabulary.len(language);
            let noun = if count == 1 { "word" } else { "words" };
            let _ = writeln!(out, "  {language} ({count} {noun})");
        }
        return out;
    };

    let _ = writeln!(out, "== {language} / {} ==", state.mode());

    match state.mode() {
        Mode::Game => render_game(&mut out, state, vocabulary, language),
        Mode::Dictionary => {
            let _ = writeln!(out, "Search: \"{}\"", state.search());
            let entries = state.dictionary(vocabulary);
            if entries.is_empty() {
                out.push_str("  No entries\n");
            }
            for entry in entries {
                let _ = writeln!(out, "  {} - {}", entry.word, entry.meaning);
            }
        }
        Mode::Add => {
            let _ = writeln!(out, "Word:    {}", state.word());
            let _ = writeln!(out, "Meaning: {}", state.meaning());
        }
    }

    out
}

fn render_game(out: &mut String, state: &AppState, vocabulary: &Vocabulary, language: Language) {
    let Some(card) = state.current_card(vocabulary) else {
        out.push_str("No words yet. Use 'add' to create some.\n");
        return;
    };

    let _ = writeln!(
        out,
        "Card {}/{}",
        state.index() + 1,
        vocabulary.len(language)
    );
    if state.flipped() {
        let _ = writeln!(out, "  {}", card.meaning);
        if !state.answer().is_empty() {
            let _ = writeln!(out, "  your answer: {}", state.answer());
        }
    } else {
        let _ = writeln!(out, "  {}", card.word);
    }
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input, writing output, or saving the
/// vocabulary fails.
pub fn run<R: BufRead, W: Write>(app: &mut App, mut input: R, mut output: W) -> Result<()> {
    write!(output, "{}", render(app.state(), app.vocabulary()))?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };
        debug!("Shell command: {command:?}");

        let transition = match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            ShellCommand::Action(action) => app.dispatch(action)?,
            ShellCommand::Answer(answer) => match app.dispatch(Action::SetAnswer(answer))? {
                Transition::Ignored(reason) => Transition::Ignored(reason),
                _ => app.dispatch(Action::Submit)?,
            },
        };

        match transition {
            Transition::Ignored(reason) => writeln!(output, "({reason})")?,
            Transition::VocabularyChanged => {
                writeln!(output, "Saved.")?;
                write!(output, "{}", render(app.state(), app.vocabulary()))?;
            }
            Transition::ViewChanged => {
                write!(output, "{}", render(app.state(), app.vocabulary()))?;
            }
        }
    }

    Ok(())
}
