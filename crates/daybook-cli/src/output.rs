//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use daybook_core::content;
use daybook_core::models::{Character, CharacterMapping, ComicEntry, Folder, JournalEntry};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a list of entries with plain-text previews
    pub fn print_entries(&self, entries: &[JournalEntry]) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No entries found.");
                    return;
                }
                for entry in entries {
                    let preview = content::deserialize(&entry.content).plain_text();
                    println!(
                        "{} | {} | {} | {}",
                        entry.id,
                        entry.date_created.format("%Y-%m-%d"),
                        truncate(entry.display_title(), 30),
                        truncate_line(&preview, 40)
                    );
                }
                println!("\n{} entry(ies)", entries.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entries).unwrap());
            }
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.id);
                }
            }
        }
    }

    /// Print one entry with its rendered body
    pub fn print_entry(&self, entry: &JournalEntry, body: &str) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", entry.id);
                println!("Title:   {}", entry.display_title());
                println!("Created: {}", entry.date_created.format("%Y-%m-%d %H:%M"));
                if let Some(folder) = entry.folder {
                    println!("Folder:  {}", folder);
                }
                if let Some(comic) = entry.comic_entry {
                    println!("Comic:   {}", comic);
                }
                println!();
                println!("{}", body);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entry).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", body);
            }
        }
    }

    /// Print a list of folders
    pub fn print_folders(&self, folders: &[Folder]) {
        match self.format {
            OutputFormat::Human => {
                if folders.is_empty() {
                    println!("No folders found.");
                    return;
                }
                for folder in folders {
                    let locked = if folder.is_locked { " [locked]" } else { "" };
                    let color = folder
                        .color
                        .as_deref()
                        .map(|c| format!(" ({})", c))
                        .unwrap_or_default();
                    println!("{} | {}{}{}", folder.id, folder.name, locked, color);
                }
                println!("\n{} folder(s)", folders.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(folders).unwrap());
            }
            OutputFormat::Quiet => {
                for folder in folders {
                    println!("{}", folder.id);
                }
            }
        }
    }

    /// Print characters along with the user's mappings
    pub fn print_characters(&self, characters: &[Character], mappings: &[CharacterMapping]) {
        match self.format {
            OutputFormat::Human => {
                if characters.is_empty() {
                    println!("No characters found.");
                } else {
                    for character in characters {
                        let description = character
                            .description
                            .as_deref()
                            .map(|d| format!(" - {}", truncate(d, 50)))
                            .unwrap_or_default();
                        println!("{} | {}{}", character.id, character.name, description);
                    }
                    println!("\n{} character(s)", characters.len());
                }

                if !mappings.is_empty() {
                    println!();
                    println!("── Mappings ({}) ──", mappings.len());
                    for mapping in mappings {
                        let relationship = if mapping.relationship.is_empty() {
                            String::new()
                        } else {
                            format!(" ({})", mapping.relationship)
                        };
                        println!(
                            "{} -> character {}{}",
                            mapping.real_life_name, mapping.character, relationship
                        );
                    }
                }
            }
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "characters": characters,
                    "mappings": mappings,
                });
                println!("{}", serde_json::to_string_pretty(&value).unwrap());
            }
            OutputFormat::Quiet => {
                for character in characters {
                    println!("{}", character.id);
                }
            }
        }
    }

    /// Print a comic
    pub fn print_comic(&self, comic: &ComicEntry) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:    {}", comic.id);
                if comic.comic_image.is_empty() {
                    println!("Image: (not ready yet)");
                } else {
                    println!("Image: {}", comic.comic_image);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(comic).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", comic.comic_image);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length in chars, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}
