//! Auth command handlers
//!
//! Login and registration exchange credentials for a token pair, which is
//! stored on disk and injected on later runs. Logout just forgets it.

use anyhow::{bail, Context, Result};
use std::io::{self, Write};

use daybook_core::{ApiClient, Config, CredentialStore};

use super::describe;
use crate::output::Output;

/// Log in and store the token pair
pub async fn login(config: &Config, client: &ApiClient, output: &Output) -> Result<()> {
    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;

    let credential = client.login(&username, &password).await.map_err(describe)?;

    CredentialStore::new(config)
        .save(&credential)
        .context("Failed to store credentials")?;

    output.success(&format!("Logged in as {}", username));
    Ok(())
}

/// Create an account and store its first token pair
pub async fn register(config: &Config, client: &ApiClient, output: &Output) -> Result<()> {
    let username = prompt("Username: ")?;
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;

    let credential = client
        .register(&username, &email, &password)
        .await
        .map_err(describe)?;

    CredentialStore::new(config)
        .save(&credential)
        .context("Failed to store credentials")?;

    output.success(&format!("Registered and logged in as {}", username));
    Ok(())
}

/// Remove the stored token pair
pub fn logout(config: &Config, output: &Output) -> Result<()> {
    let removed = CredentialStore::new(config)
        .clear()
        .context("Failed to remove credentials")?;

    if removed {
        output.success("Logged out");
    } else {
        output.message("No stored credentials.");
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_string();

    if input.is_empty() {
        bail!("Input cannot be empty");
    }
    Ok(input)
}
