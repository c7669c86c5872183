//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [oauth]                  # identity provider, client-credentials grant
//! [engine]                 # workflow engine REST API
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::{ConfigError, Result};

/// Env var consulted for the client secret when `client_secret_env` is unset.
pub const DEFAULT_SECRET_ENV: &str = "PROCVIEW_CLIENT_SECRET";

/// Default timeout for both the token endpoint and engine calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcviewConfig {
    /// Identity provider settings.
    pub oauth: OAuthSection,

    /// Workflow engine settings.
    pub engine: EngineSection,
}

impl ProcviewConfig {
    /// Parse from a TOML string and validate.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: ProcviewConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.oauth.timeout_secs == 0 {
            return Err(invalid("oauth.timeout_secs", "must be greater than zero"));
        }
        if self.engine.timeout_secs == 0 {
            return Err(invalid("engine.timeout_secs", "must be greater than zero"));
        }
        if self.oauth.client_id.trim().is_empty() {
            return Err(invalid("oauth.client_id", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// [oauth]
// ─────────────────────────────────────────────────────────────────────────────

/// Client-credentials settings.
#[derive(Clone, Deserialize)]
pub struct OAuthSection {
    /// Token endpoint URL.
    pub token_url: String,

    /// OAuth client identifier.
    pub client_id: String,

    /// Inline client secret (plaintext, prefer the env var).
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Name of the env var holding the client secret.
    #[serde(default)]
    pub client_secret_env: Option<String>,

    /// Scope requested with every grant.
    #[serde(default)]
    pub scope: Option<String>,

    /// Token request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl OAuthSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Env var name checked for the secret.
    pub fn secret_env_var(&self) -> &str {
        self.client_secret_env.as_deref().unwrap_or(DEFAULT_SECRET_ENV)
    }

    /// Whether the secret is stored in plaintext in the config file.
    pub fn has_plaintext_secret(&self) -> bool {
        self.client_secret.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Resolve the client secret: environment first, then the config file.
    pub fn resolve_secret(&self) -> Result<String> {
        self.resolve_secret_with(|var| std::env::var(var).ok())
    }

    /// Resolve the client secret with a custom environment lookup.
    pub fn resolve_secret_with<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_var = self.secret_env_var();
        if let Some(value) = lookup(env_var)
            && !value.is_empty()
        {
            return Ok(value);
        }

        if let Some(value) = &self.client_secret
            && !value.is_empty()
        {
            return Ok(value.clone());
        }

        Err(ConfigError::MissingSecret {
            env_var: env_var.to_string(),
        })
    }
}

impl std::fmt::Debug for OAuthSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSection")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("client_secret_env", &self.client_secret_env)
            .field("scope", &self.scope)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// [engine]
// ─────────────────────────────────────────────────────────────────────────────

/// Workflow engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSection {
    /// Base URL of the engine REST API.
    pub base_url: String,

    /// Default request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EngineSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
