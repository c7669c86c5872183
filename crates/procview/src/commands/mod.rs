//! CLI command handlers.

pub mod events;
pub mod process;
pub mod subprocesses;
pub mod tasks;
pub mod token;
pub mod variables;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use procview_auth::{Credentials, TokenManager};
use procview_client::AuthenticatedClient;

/// Shared context for all commands.
///
/// One token manager per process; the client holds a handle to it.
#[derive(Debug, Clone)]
pub struct Context {
    /// Token manager for the configured credentials.
    pub tokens: Arc<TokenManager>,
    /// Authenticated engine client.
    pub client: AuthenticatedClient,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Load config and wire up the token manager and client.
    pub fn load(config_path: Option<&Path>, json_output: bool, verbose: bool) -> Result<Self> {
        let loaded = procview_config::load_config(config_path)?;
        tracing::debug!(source = %loaded.source.display(), "Loaded config");
        for warning in &loaded.warnings {
            tracing::warn!("{}", warning);
        }

        let oauth = &loaded.config.oauth;
        let secret = oauth.resolve_secret()?;

        let mut credentials = Credentials::new(&oauth.token_url, &oauth.client_id, secret)
            .context("Invalid [oauth] settings")?
            .with_timeout(oauth.timeout());
        if let Some(scope) = &oauth.scope {
            credentials = credentials.with_scope(scope);
        }

        let tokens = Arc::new(TokenManager::new(credentials)?);

        let engine = &loaded.config.engine;
        let client = AuthenticatedClient::builder()
            .base_url(&engine.base_url)
            .token_provider(tokens.clone())
            .timeout(engine.timeout())
            .build()
            .context("Invalid [engine] settings")?;

        Ok(Self {
            tokens,
            client,
            json_output,
            verbose,
        })
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render an optional field for human output.
pub fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
