//! Daybook CLI
//!
//! Command-line interface for daybook - rich-text journaling.

use std::fs::File;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use daybook_core::{ApiClient, Config, CredentialStore};

mod commands;
mod editor;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Daybook - rich-text journaling from the terminal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store a token pair
    Login,
    /// Create an account
    Register,
    /// Forget the stored token pair
    Logout,
    /// Write a new entry in your editor
    Write {
        /// Entry title (derived from the first line when omitted)
        #[arg(short, long)]
        title: Option<String>,
        /// Folder ID to file the entry under
        #[arg(short, long)]
        folder: Option<i64>,
    },
    /// Manage entries
    Entry {
        #[command(subcommand)]
        command: EntryCommands,
    },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Manage comic characters
    Character {
        #[command(subcommand)]
        command: CharacterCommands,
    },
    /// Manage entry comics
    Comic {
        #[command(subcommand)]
        command: ComicCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show login state and writing streak
    Status,
}

#[derive(Subcommand)]
enum EntryCommands {
    /// List entries
    #[command(alias = "ls")]
    List {
        /// Only entries in this folder
        #[arg(short, long)]
        folder: Option<i64>,
    },
    /// Show one entry, rendered as HTML
    Show {
        /// Entry ID
        id: i64,
        /// Show plain text instead of HTML
        #[arg(long)]
        text: bool,
    },
    /// Rename an entry
    Rename {
        /// Entry ID
        id: i64,
        /// New title
        title: String,
    },
    /// Move an entry into a folder
    Move {
        /// Entry ID
        id: i64,
        /// Destination folder ID
        folder: i64,
    },
    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum FolderCommands {
    /// List folders
    #[command(alias = "ls")]
    List,
    /// Create a folder
    Create {
        /// Folder name
        name: String,
        /// Display color
        #[arg(short, long)]
        color: Option<String>,
        /// Parent folder ID
        #[arg(short, long)]
        parent: Option<i64>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a folder
    #[command(alias = "rm")]
    Delete {
        /// Folder ID
        id: i64,
    },
    /// Lock a folder against changes
    Lock {
        /// Folder ID
        id: i64,
    },
    /// Unlock a folder
    Unlock {
        /// Folder ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum CharacterCommands {
    /// List characters and your mappings
    #[command(alias = "ls")]
    List,
    /// Create a character
    Create {
        /// Character name
        name: String,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Map a real-life person to a character
    Map {
        /// Character ID
        character_id: i64,
        /// Person's name as it appears in entries
        real_life_name: String,
        /// Relationship to you
        #[arg(short, long, default_value = "")]
        relationship: String,
        /// Gender
        #[arg(short, long, default_value = "")]
        gender: String,
        /// Age group
        #[arg(short, long, default_value = "")]
        age_group: String,
    },
}

#[derive(Subcommand)]
enum ComicCommands {
    /// Generate a comic for an entry
    Create {
        /// Entry ID
        entry_id: i64,
        /// Character ID to draw
        #[arg(short, long)]
        character: i64,
        /// Open the comic image when it is ready
        #[arg(long)]
        open: bool,
    },
    /// Show a comic
    Show {
        /// Comic ID
        id: i64,
        /// Open the comic image in your viewer
        #[arg(long)]
        open: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, data_dir, timeout_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = Config::load()?;
    init_logging(&config);

    // Commands that don't need the API client
    match &cli.command {
        Commands::Config { command } => {
            return commands::config::handle(command.clone(), &output);
        }
        Commands::Logout => {
            return commands::auth::logout(&config, &output);
        }
        _ => {}
    }

    let credential = match CredentialStore::new(&config).load() {
        Ok(credential) => credential,
        Err(err) => {
            tracing::warn!("ignoring unreadable credentials file: {}", err);
            None
        }
    };
    let client = ApiClient::new(&config, credential)?;

    match cli.command {
        Commands::Config { .. } | Commands::Logout => unreachable!(), // Handled above
        Commands::Login => commands::auth::login(&config, &client, &output).await,
        Commands::Register => commands::auth::register(&config, &client, &output).await,
        Commands::Write { title, folder } => {
            commands::entry::write(&client, title, folder, &output).await
        }
        Commands::Entry { command } => handle_entry_command(command, &client, &output).await,
        Commands::Folder { command } => handle_folder_command(command, &client, &output).await,
        Commands::Character { command } => {
            handle_character_command(command, &client, &output).await
        }
        Commands::Comic { command } => handle_comic_command(command, &client, &output).await,
        Commands::Status => commands::status::show(&config, &client, &output).await,
    }
}

async fn handle_entry_command(
    command: EntryCommands,
    client: &ApiClient,
    output: &Output,
) -> Result<()> {
    match command {
        EntryCommands::List { folder } => commands::entry::list(client, folder, output).await,
        EntryCommands::Show { id, text } => commands::entry::show(client, id, text, output).await,
        EntryCommands::Rename { id, title } => {
            commands::entry::rename(client, id, title, output).await
        }
        EntryCommands::Move { id, folder } => {
            commands::entry::move_to_folder(client, id, folder, output).await
        }
        EntryCommands::Delete { id } => commands::entry::delete(client, id, output).await,
    }
}

async fn handle_folder_command(
    command: FolderCommands,
    client: &ApiClient,
    output: &Output,
) -> Result<()> {
    match command {
        FolderCommands::List => commands::folder::list(client, output).await,
        FolderCommands::Create {
            name,
            color,
            parent,
        } => commands::folder::create(client, name, color, parent, output).await,
        FolderCommands::Rename { id, name } => {
            commands::folder::rename(client, id, name, output).await
        }
        FolderCommands::Delete { id } => commands::folder::delete(client, id, output).await,
        FolderCommands::Lock { id } => commands::folder::set_locked(client, id, true, output).await,
        FolderCommands::Unlock { id } => {
            commands::folder::set_locked(client, id, false, output).await
        }
    }
}

async fn handle_character_command(
    command: CharacterCommands,
    client: &ApiClient,
    output: &Output,
) -> Result<()> {
    match command {
        CharacterCommands::List => commands::character::list(client, output).await,
        CharacterCommands::Create { name, description } => {
            commands::character::create(client, name, description, output).await
        }
        CharacterCommands::Map {
            character_id,
            real_life_name,
            relationship,
            gender,
            age_group,
        } => {
            commands::character::map(
                client,
                character_id,
                real_life_name,
                relationship,
                gender,
                age_group,
                output,
            )
            .await
        }
    }
}

async fn handle_comic_command(
    command: ComicCommands,
    client: &ApiClient,
    output: &Output,
) -> Result<()> {
    match command {
        ComicCommands::Create {
            entry_id,
            character,
            open,
        } => commands::comic::create(client, entry_id, character, open, output).await,
        ComicCommands::Show { id, open } => commands::comic::show(client, id, open, output).await,
    }
}

/// Initialize logging
///
/// Only initializes if the DAYBOOK_LOG environment variable is set.
/// Logs go to a file in the data directory so terminal output stays clean.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("DAYBOOK_LOG") else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "daybook_core={},daybook_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();
}
