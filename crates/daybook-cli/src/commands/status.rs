//! Status command handler

use anyhow::Result;

use daybook_core::{ApiClient, Config, CredentialStore};

use crate::output::{Output, OutputFormat};

/// Show connection status and the current writing streak.
///
/// The streak lookup is best-effort: a server that does not expose
/// gamification simply leaves the streak lines out.
pub async fn show(config: &Config, client: &ApiClient, output: &Output) -> Result<()> {
    let store = CredentialStore::new(config);
    let logged_in = client.has_credential();

    let streak = if logged_in {
        client.get_streak().await.ok()
    } else {
        None
    };

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": client.base_url(),
                    "logged_in": logged_in,
                    "credentials_path": store.path(),
                    "current_streak": streak.as_ref().map(|s| s.current_streak),
                    "longest_streak": streak.as_ref().and_then(|s| s.longest_streak),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", if logged_in { "yes" } else { "no" });
        }
        OutputFormat::Human => {
            println!("API:       {}", client.base_url());
            if logged_in {
                println!("Logged in: yes");
            } else {
                println!("Logged in: no (run `daybook login`)");
            }
            if let Some(streak) = streak {
                println!("Streak:    {} day(s)", streak.current_streak);
                if let Some(longest) = streak.longest_streak {
                    println!("Longest:   {} day(s)", longest);
                }
            }
        }
    }

    Ok(())
}
