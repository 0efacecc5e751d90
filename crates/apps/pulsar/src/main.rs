//! Pulsar - Gmail label snapshot recorder
//!
//! Takes one snapshot per invocation: resolves a credential, fetches
//! unread/total thread counts for the tracked labels, and appends a
//! timestamped row per label to the snapshot CSV.

use anyhow::{Context, Result};
use log::{info, warn};
use mail::{
    AuthConfig, BrowserPrompt, GmailAuth, GmailClient, GmailCredentials, SnapshotConfig,
    SnapshotRecorder,
};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    config::init().context("Failed to initialize config directory")?;

    // Load Gmail credentials from config file or environment
    let credentials = match GmailCredentials::load() {
        Ok(credentials) => credentials,
        Err(e) => {
            if let Some(path) = GmailCredentials::default_credentials_path() {
                warn!(
                    "To configure Gmail access, either:\n\
                     1. Place your Google OAuth credentials at: {}\n\
                     2. Or set environment variables: GMAIL_CLIENT_ID and GMAIL_CLIENT_SECRET",
                    path.display()
                );
            }
            return Err(e.context("Gmail credentials not found"));
        }
    };

    let auth_config = AuthConfig::new(credentials.client_id, credentials.client_secret)?;
    let prompt = Box::new(BrowserPrompt::new(auth_config.clone()));
    let client = GmailClient::new(GmailAuth::new(auth_config, prompt));

    // Resolve the credential before fetching anything
    client
        .authenticate()
        .context("Gmail authentication failed")?;

    let recorder = SnapshotRecorder::new(SnapshotConfig::from_home()?);
    let appended = recorder.record(&client)?;

    info!("Snapshot complete: {} label rows appended", appended);
    Ok(())
}
