//! Gmail OAuth2 authentication
//!
//! Implements OAuth2 authorization code flow for Gmail API authentication.
//! Uses a local HTTP server to receive the OAuth callback.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;

/// Google OAuth2 endpoints
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Required scope for Gmail access (read-only: labels and message listings)
const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Token storage filename in the Pulsar config directory
const TOKEN_FILE: &str = "gmail-tokens.json";

/// Seconds of remaining lifetime below which a token counts as expired
const EXPIRY_BUFFER_SECS: i64 = 300;

/// OAuth2 configuration for the credential lifecycle.
///
/// Built once at startup and passed into [`GmailAuth`] and [`BrowserPrompt`]
/// at construction time.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// OAuth scopes requested during authorization
    pub scopes: Vec<String>,
    /// Where the serialized credential is persisted between runs
    pub token_path: PathBuf,
    pub auth_url: String,
    pub token_url: String,
}

impl AuthConfig {
    /// Create a config with the default read-only scope, token store path
    /// (~/.config/pulsar/gmail-tokens.json) and Google endpoints
    pub fn new(client_id: String, client_secret: String) -> Result<Self> {
        let token_path =
            config::config_path(TOKEN_FILE).context("Could not determine config directory")?;

        Ok(Self {
            client_id,
            client_secret,
            scopes: vec![GMAIL_READONLY_SCOPE.to_string()],
            token_path,
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
        })
    }

    fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }
}

/// The interactive, out-of-process authorization step.
///
/// [`GmailAuth`] falls back to this capability when no stored credential can
/// be used or refreshed. Production code uses [`BrowserPrompt`]; tests swap
/// in a double returning a canned credential.
pub trait AuthorizationPrompt {
    fn obtain_credential(&self) -> Result<TokenResponse>;
}

/// Stored token data
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
}

/// Token response from Google
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
}

/// Credential manager: produces a valid access token, refreshing or
/// re-authorizing as needed, and keeps the token store up to date.
pub struct GmailAuth {
    config: AuthConfig,
    prompt: Box<dyn AuthorizationPrompt>,
}

impl GmailAuth {
    pub fn new(config: AuthConfig, prompt: Box<dyn AuthorizationPrompt>) -> Self {
        Self { config, prompt }
    }

    /// Get a valid access token, refreshing or re-authorizing as needed
    pub fn get_access_token(&self) -> Result<String> {
        if let Ok(token) = self.load_token() {
            // Check if token is still valid (with 5 minute buffer)
            if let Some(expires_at) = token.expires_at {
                let now = chrono::Utc::now().timestamp();
                if expires_at > now + EXPIRY_BUFFER_SECS {
                    return Ok(token.access_token);
                }
            }

            // Expired: refresh in place. A failed refresh is fatal, not a
            // fallback into the interactive flow.
            if let Some(refresh_token) = token.refresh_token {
                info!("Stored access token expired, refreshing");
                let new_token = self.refresh_access_token(&refresh_token)?;
                self.save_token_response(&new_token)?;
                return Ok(new_token.access_token);
            }
        }

        // No usable credential: run the interactive authorization step
        let token = self.prompt.obtain_credential()?;
        self.save_token_response(&token)?;
        Ok(token.access_token)
    }

    /// Refresh an access token using a refresh token
    fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let response = ureq::post(&self.config.token_url)
            .send_form([
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .context("Failed to refresh access token")?;

        let mut token: TokenResponse = response
            .into_body()
            .read_json()
            .context("Failed to parse refresh token response")?;

        // Preserve the refresh token if not returned
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }

        Ok(token)
    }

    /// Load stored token from disk
    fn load_token(&self) -> Result<StoredToken> {
        let content = fs::read_to_string(&self.config.token_path)?;
        let token: StoredToken = serde_json::from_str(&content)?;
        Ok(token)
    }

    /// Save token response to disk, overwriting any prior content
    fn save_token_response(&self, token: &TokenResponse) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.config.token_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredToken {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at: token
                .expires_in
                .map(|d| chrono::Utc::now().timestamp() + d as i64),
        };

        let content = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.config.token_path, content)?;
        Ok(())
    }
}

/// Browser-based [`AuthorizationPrompt`] using a local callback server
pub struct BrowserPrompt {
    config: AuthConfig,
}

impl BrowserPrompt {
    /// Port range to try for the local OAuth callback server
    const PORT_RANGE_START: u16 = 8080;
    const PORT_RANGE_END: u16 = 8090;

    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Start a local TCP server on an available port
    fn start_local_server(&self) -> Result<(TcpListener, u16)> {
        for port in Self::PORT_RANGE_START..=Self::PORT_RANGE_END {
            if let Ok(listener) = TcpListener::bind(format!("127.0.0.1:{}", port)) {
                return Ok((listener, port));
            }
        }
        anyhow::bail!(
            "Could not bind to any port in range {}-{}",
            Self::PORT_RANGE_START,
            Self::PORT_RANGE_END
        )
    }

    /// Wait for OAuth callback and extract authorization code
    fn wait_for_callback(&self, listener: TcpListener) -> Result<String> {
        let (mut stream, _) = listener.accept().context("Failed to accept connection")?;

        let mut reader = BufReader::new(&stream);
        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .context("Failed to read request")?;

        // Parse the request to get the code
        // Format: GET /?code=AUTH_CODE&scope=... HTTP/1.1
        let code = query_param(&request_line, "code");

        // Check for error in callback
        let error = query_param(&request_line, "error");

        // Send response to browser
        let (status, body) = if code.is_some() {
            ("200 OK", "Authorization complete! You can close this window.")
        } else {
            ("400 Bad Request", "Authorization failed. Please try again.")
        };

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n<html><body><h1>{}</h1></body></html>",
            status, body
        );
        stream.write_all(response.as_bytes()).ok();

        if let Some(err) = error {
            anyhow::bail!("OAuth error: {}", err);
        }

        code.context("No authorization code received")
    }
}

impl AuthorizationPrompt for BrowserPrompt {
    /// Perform authorization code flow authentication
    fn obtain_credential(&self) -> Result<TokenResponse> {
        // Step 1: Start local server to receive callback
        let (listener, port) = self.start_local_server()?;
        let redirect_uri = format!("http://localhost:{}", port);

        // Step 2: Build authorization URL
        let auth_url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            self.config.auth_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&redirect_uri),
            urlencoding::encode(&self.config.scope_param()),
        );

        println!("\n=== Gmail Authorization Required ===");
        println!("Opening browser for authorization...");
        println!("If the browser doesn't open, visit: {}", auth_url);

        // Open browser
        if let Err(e) = open::that(&auth_url) {
            eprintln!("Failed to open browser: {}. Please open the URL manually.", e);
        }

        // Step 3: Wait for callback with authorization code
        println!("Waiting for authorization...");
        let code = self.wait_for_callback(listener)?;

        // Step 4: Exchange code for tokens
        println!("Exchanging authorization code for tokens...");
        let mut response = ureq::post(&self.config.token_url)
            .send_form([
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code.as_str()),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .context("Failed to exchange authorization code")?;

        let token: TokenResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse token response")?;

        println!("Authorization successful!\n");
        Ok(token)
    }
}

/// Extract a query parameter from an HTTP request line
fn query_param(request_line: &str, name: &str) -> Option<String> {
    request_line
        .split_whitespace()
        .nth(1) // Get the path
        .and_then(|path| {
            path.split('?')
                .nth(1) // Get query string
                .and_then(|query| {
                    query.split('&').find_map(|param| {
                        let mut parts = param.split('=');
                        if parts.next() == Some(name) {
                            parts.next().map(|s| s.to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}
