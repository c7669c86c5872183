//! Client-credentials grant against the identity provider.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{AuthError, Result};

/// Default timeout for the token request.
pub const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Lifetime assumed when the provider omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Immutable client-credentials configuration.
#[derive(Clone)]
pub struct Credentials {
    token_url: Url,
    client_id: String,
    client_secret: String,
    scope: Option<String>,
    timeout: Duration,
}

impl Credentials {
    /// Create credentials for a token endpoint.
    pub fn new(
        token_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let token_url = Url::parse(token_url)
            .map_err(|e| AuthError::Config(format!("Invalid token URL '{}': {}", token_url, e)))?;
        let client_id = client_id.into();
        if client_id.is_empty() {
            return Err(AuthError::Config("client_id must not be empty".to_string()));
        }

        Ok(Self {
            token_url,
            client_id,
            client_secret: client_secret.into(),
            scope: None,
            timeout: DEFAULT_TOKEN_TIMEOUT,
        })
    }

    /// Request a scope with every grant.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = (!scope.is_empty()).then_some(scope);
        self
    }

    /// Override the token request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Form fields of the grant request.
    pub(crate) fn grant_form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        if let Some(scope) = &self.scope {
            form.push(("scope", scope.as_str()));
        }
        form
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Successful grant, already validated.
#[derive(Debug, Clone)]
pub(crate) struct GrantedToken {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Perform one client-credentials grant.
pub(crate) async fn request_token(
    http: &reqwest::Client,
    credentials: &Credentials,
) -> Result<GrantedToken> {
    let response = http
        .post(credentials.token_url.clone())
        .form(&credentials.grant_form())
        .timeout(credentials.timeout)
        .send()
        .await
        .map_err(|e| AuthError::Network(format!("Token request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::Network(format!("Failed to read token response: {}", e)))?;

    if !status.is_success() {
        return Err(AuthError::Status {
            status: status.as_u16(),
            message: describe_error_body(&body),
        });
    }

    parse_token_response(&body)
}

fn parse_token_response(body: &str) -> Result<GrantedToken> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    let access_token = parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingAccessToken)?;

    Ok(GrantedToken {
        access_token,
        expires_in: parsed.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
    })
}

fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(err) => match err.error_description {
            Some(desc) => format!("{}: {}", err.error, desc),
            None => err.error,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
