//! Interactive editing support
//!
//! Opens $EDITOR for composing entry text. The composed draft stays on
//! disk until the caller discards it, so a crashed editor or a failed
//! save never loses what was written.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A composed entry, on disk until explicitly discarded
///
/// Dropping a `Draft` leaves its file in place. Only `discard` removes
/// it, and callers do that once the content is stored somewhere safer.
#[derive(Debug)]
pub struct Draft {
    path: PathBuf,
    content: String,
}

impl Draft {
    /// What the user wrote
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Where the draft file lives
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the draft file
    pub fn discard(self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Open content in the user's preferred editor and return the draft
///
/// Uses $EDITOR, $VISUAL, or falls back to common editors. The draft
/// file survives every failure path: an editor that exits non-zero
/// keeps it, and the error names where it is.
pub fn edit_text(initial_content: &str) -> Result<Draft> {
    let editor = find_editor()?;

    let path = tempfile::Builder::new()
        .prefix("daybook_entry_")
        .suffix(".md")
        .tempfile()
        .context("Failed to create draft file")?
        .into_temp_path()
        .keep()
        .context("Failed to keep draft file")?;

    fs::write(&path, initial_content)
        .with_context(|| format!("Failed to write draft file: {:?}", path))?;

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor))?;

    if !status.success() {
        bail!(
            "Editor '{}' exited with non-zero status. Your draft is kept at {}",
            editor,
            path.display()
        );
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read draft file: {:?}", path))?;

    Ok(Draft { path, content })
}

/// Find the user's preferred editor
fn find_editor() -> Result<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(visual) = env::var("VISUAL") {
        if !visual.is_empty() {
            return Ok(visual);
        }
    }

    for editor in ["nano", "vim", "vi"] {
        if command_exists(editor) {
            return Ok(editor.to_string());
        }
    }

    bail!(
        "No editor found. Set $EDITOR environment variable.\n\
         Example: export EDITOR=nano"
    )
}

/// Check if a command exists in PATH
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_editor_with_env() {
        // Depends on the environment, so just verify it doesn't panic
        let _ = find_editor();
    }

    #[test]
    fn test_command_exists() {
        #[cfg(unix)]
        assert!(command_exists("ls"));

        assert!(!command_exists("definitely_not_a_real_command_12345"));
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_text_returns_editor_output() {
        use super::test_support::{stub_editor, EditorGuard};

        let dir = tempfile::tempdir().unwrap();
        let editor = stub_editor(dir.path(), "#!/bin/sh\necho edited > \"$1\"\n");

        let _guard = EditorGuard::set(&editor);
        let draft = edit_text("seed\n").unwrap();

        assert_eq!(draft.content(), "edited\n");
        draft.discard();
    }

    #[cfg(unix)]
    #[test]
    fn test_draft_file_survives_until_discarded() {
        use super::test_support::{stub_editor, EditorGuard};

        let dir = tempfile::tempdir().unwrap();
        let editor = stub_editor(dir.path(), "#!/bin/sh\necho words > \"$1\"\n");

        let _guard = EditorGuard::set(&editor);
        let draft = edit_text("").unwrap();

        let path = draft.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(draft.content(), "words\n");

        draft.discard();
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_failure_keeps_draft_file() {
        use super::test_support::{stub_editor, EditorGuard};

        let dir = tempfile::tempdir().unwrap();
        let editor = stub_editor(dir.path(), "#!/bin/sh\necho partial > \"$1\"\nexit 1\n");

        let _guard = EditorGuard::set(&editor);
        let err = edit_text("").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Your draft is kept at"));

        let path = message.rsplit("kept at ").next().unwrap().trim();
        assert_eq!(fs::read_to_string(path).unwrap(), "partial\n");
        fs::remove_file(path).unwrap();
    }
}
