//! Bearer token caching and lazy refresh.
//!
//! A [`TokenManager`] holds at most one token per set of credentials. The
//! token is fetched on first use and again whenever a caller finds it
//! stale. There is no background refresh.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use crate::clock::{SharedClock, SystemClock};
use crate::credentials::{Credentials, request_token};
use crate::error::{AuthError, Result};

/// Seconds subtracted from the provider's `expires_in`.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

// ============================================================================
// TokenProvider Trait
// ============================================================================

/// Anything that can hand out a bearer token for the next call.
#[async_trait]
pub trait TokenProvider: Send + Sync + std::fmt::Debug {
    /// Get a token valid for at least the immediate call.
    async fn get_valid_token(&self) -> Result<String>;
}

/// Shared token provider for use across async contexts.
pub type SharedTokenProvider = Arc<dyn TokenProvider>;

// ============================================================================
// Token
// ============================================================================

/// Cached token. Replaced wholesale, never edited in place.
#[derive(Debug, Clone)]
struct Token {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl Token {
    fn issue(access_token: String, expires_in: u64, now: DateTime<Utc>) -> Self {
        Self {
            access_token,
            expires_at: effective_expiry(now, expires_in),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// `now + expires_in - EXPIRY_BUFFER_SECS`, saturating at the far future.
fn effective_expiry(now: DateTime<Utc>, expires_in: u64) -> DateTime<Utc> {
    let secs = i64::try_from(expires_in)
        .unwrap_or(i64::MAX)
        .saturating_sub(EXPIRY_BUFFER_SECS);
    TimeDelta::try_seconds(secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ============================================================================
// TokenManager
// ============================================================================

/// Client-credentials token manager.
///
/// Check, fetch and store all happen under one async mutex, so concurrent
/// callers that find the cache stale trigger a single fetch and everyone
/// else waits for its result.
pub struct TokenManager {
    credentials: Credentials,
    http: reqwest::Client,
    clock: SharedClock,
    cached: Mutex<Option<Token>>,
}

impl TokenManager {
    /// Create a manager using the system clock.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    /// Create a manager with an explicit clock.
    pub fn with_clock(credentials: Credentials, clock: SharedClock) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("procview-auth/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuthError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            http,
            clock,
            cached: Mutex::new(None),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Return the cached token, fetching a new one if it is missing or stale.
    pub async fn get_valid_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = &*cached
            && !token.is_expired(self.clock.now())
        {
            tracing::debug!("Using cached access token");
            return Ok(token.access_token.clone());
        }

        if cached.is_some() {
            tracing::debug!("Cached access token is stale, fetching a new one");
        }
        self.fetch_into(&mut cached).await
    }

    /// Fetch a new token even if the cached one is still valid.
    ///
    /// On failure the cache is left as it was.
    pub async fn refresh(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        self.fetch_into(&mut cached).await
    }

    /// Drop the cached token.
    pub async fn clear_cache(&self) {
        let mut cached = self.cached.lock().await;
        *cached = None;
    }

    /// Expiry snapshot of the cached token, without fetching.
    pub async fn token_info(&self) -> Option<TokenInfo> {
        let cached = self.cached.lock().await;
        let now = self.clock.now();
        (*cached).as_ref().map(|t| TokenInfo {
            expires_at: t.expires_at,
            expires_in_secs: (t.expires_at - now).num_seconds().max(0) as u64,
            is_expired: t.is_expired(now),
        })
    }

    async fn fetch_into(&self, slot: &mut Option<Token>) -> Result<String> {
        tracing::debug!(
            token_url = %self.credentials.token_url(),
            client_id = %self.credentials.client_id(),
            "Requesting client-credentials token"
        );

        let granted = match request_token(&self.http, &self.credentials).await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::warn!(error = %e, "Token fetch failed");
                return Err(e);
            }
        };

        let token = Token::issue(granted.access_token, granted.expires_in, self.clock.now());
        tracing::info!(
            expires_in = granted.expires_in,
            expires_at = %token.expires_at,
            "Acquired access token"
        );

        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenProvider for TokenManager {
    async fn get_valid_token(&self) -> Result<String> {
        TokenManager::get_valid_token(self).await
    }
}

// ============================================================================
// StaticTokenProvider
// ============================================================================

/// Provider that always returns the same pre-issued token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_valid_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

// ============================================================================
// TokenInfo
// ============================================================================

/// Information about the cached token for display.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    /// Effective expiry, buffer already applied.
    pub expires_at: DateTime<Utc>,
    pub expires_in_secs: u64,
    pub is_expired: bool,
}

impl TokenInfo {
    pub fn expires_in_display(&self) -> String {
        if self.is_expired {
            "Expired (will refresh on next use)".to_string()
        } else {
            let hours = self.expires_in_secs / 3600;
            let minutes = (self.expires_in_secs % 3600) / 60;
            let seconds = self.expires_in_secs % 60;
            format!("{}h {}m {}s", hours, minutes, seconds)
        }
    }
}
