//! `vocab` - CLI for vocabdeck
//!
//! This binary provides the command-line interface for adding words, listing
//! the dictionary and running the interactive study shell.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use vocabdeck::app::Action;
use vocabdeck::cli::{AddCommand, Cli, Command, ConfigCommand, DictCommand, StudyCommand};
use vocabdeck::config::ListFormat;
use vocabdeck::{
    filter_and_sort, init_logging, shell, App, Config, DictionaryStats, Entry, Storage,
    VocabularyStore,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        // Config subcommands work even when the config itself is broken
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
        Command::Add(cmd) => {
            let (_, store) = open_store(cli.config)?;
            handle_add(store, &cmd)
        }
        Command::Dict(cmd) => {
            let (config, store) = open_store(cli.config)?;
            handle_dict(&store, &config, &cmd)
        }
        Command::Study(cmd) => {
            let (config, store) = open_store(cli.config)?;
            handle_study(store, &config, &cmd)
        }
        Command::Status(cmd) => {
            let (_, store) = open_store(cli.config)?;
            handle_status(&store, cmd.json)
        }
    }
}

fn open_store(config_path: Option<PathBuf>) -> anyhow::Result<(Config, VocabularyStore)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    debug!("Opened vocabulary database at {}", storage.path().display());
    let store = VocabularyStore::open(storage, config.storage.store_key.clone())
        .context("failed to load vocabulary")?;
    Ok((config, store))
}

fn handle_add(mut store: VocabularyStore, cmd: &AddCommand) -> anyhow::Result<()> {
    let language = cmd.language;
    if store.add_word(language, &cmd.word, &cmd.meaning)? {
        println!(
            "Added \"{}\" - \"{}\" to {language} ({} words)",
            cmd.word,
            cmd.meaning,
            store.vocabulary().len(language)
        );
    } else {
        warn!("Not adding an entry with an empty word or meaning");
        println!("Nothing added: both word and meaning are required.");
    }
    Ok(())
}

fn handle_dict(store: &VocabularyStore, config: &Config, cmd: &DictCommand) -> anyhow::Result<()> {
    let language = cmd.language;
    let entries = filter_and_sort(
        store.vocabulary().entries(language),
        cmd.search.as_deref().unwrap_or_default(),
    );
    let format = cmd
        .format
        .map_or(config.dictionary.default_format, ListFormat::from);

    match format {
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        ListFormat::Plain => {
            if entries.is_empty() {
                println!("No entries");
            }
            for entry in &entries {
                println!("{} - {}", entry.word, entry.meaning);
            }
        }
        ListFormat::Table => print_table(&entries),
    }
    Ok(())
}

fn print_table(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No entries");
        return;
    }

    let width = entries
        .iter()
        .map(|e| e.word.chars().count())
        .chain(std::iter::once("WORD".len()))
        .max()
        .unwrap_or(0);

    println!("{:<width$}  MEANING", "WORD");
    println!("{}  {}", "-".repeat(width), "-".repeat("MEANING".len()));
    for entry in entries {
        println!("{:<width$}  {}", entry.word, entry.meaning);
    }
    println!();
    println!("{} entries", entries.len());
}

fn handle_study(store: VocabularyStore, config: &Config, cmd: &StudyCommand) -> anyhow::Result<()> {
    let mut app = App::new(store);

    let language = cmd.language.or(config.study.default_language);
    if let Some(language) = language {
        app.dispatch(Action::SelectLanguage(language))?;
        if cmd.shuffle || config.study.shuffle_on_start {
            app.dispatch(Action::Shuffle)?;
        }
    }

    let stdin = std::io::stdin();
    shell::run(&mut app, stdin.lock(), std::io::stdout()).context("study session failed")?;
    Ok(())
}

fn handle_status(store: &VocabularyStore, json: bool) -> anyhow::Result<()> {
    let counts = DictionaryStats::from_vocabulary(store.vocabulary());
    let storage = store.storage().stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": store.storage().path(),
            "store_key": store.key(),
            "vocabulary": counts,
            "last_updated": storage.last_updated,
            "db_size_bytes": storage.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("vocab status");
        println!("------------");
        for language in &counts.languages {
            let label = format!("{}:", language.language);
            println!(
                "{label:<13}  {} entries ({} distinct)",
                language.entries, language.distinct_words
            );
        }
        println!("{:<13}  {}", "Total:", counts.total_entries);
        println!();
        println!("Database:      {}", store.storage().path().display());
        println!("Store key:     {}", store.key());
        match storage.last_updated {
            Some(at) => println!("Last saved:    {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            None => println!("Last saved:    never"),
        }
        println!("Size:          {} bytes", storage.db_size_bytes);
    }
    Ok(())
}

fn handle_config(path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(path).context("failed to load configuration")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Store key:          {}", config.storage.store_key);
                println!();
                println!("[Study]");
                match config.study.default_language {
                    Some(language) => println!("  Default language:   {language}"),
                    None => println!("  Default language:   (none)"),
                }
                println!("  Shuffle on start:   {}", config.study.shuffle_on_start);
                println!();
                println!("[Dictionary]");
                println!(
                    "  Default format:     {:?}",
                    config.dictionary.default_format
                );
            }
        }
        ConfigCommand::Path => {
            let path = path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
