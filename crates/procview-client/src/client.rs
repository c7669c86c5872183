//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use procview_auth::{AuthError, SharedTokenProvider};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::api::{EventsApi, ProcessInstancesApi, SubprocessesApi, TasksApi, VariablesApi};
use crate::error::{Error, Result};
use crate::request::{ApiResponse, RequestSpec};

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client that attaches a bearer token to every call.
///
/// Each [`execute`](Self::execute) asks the token provider for a valid
/// token first, so at most one token fetch happens per call and only when
/// the cached token has gone stale. Cloning is cheap and shares the
/// provider.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use procview_auth::StaticTokenProvider;
/// use procview_client::{AuthenticatedClient, RequestSpec};
///
/// # async fn example() -> procview_client::Result<()> {
/// let client = AuthenticatedClient::builder()
///     .base_url("http://localhost:8080/engine-rest/")
///     .token_provider(Arc::new(StaticTokenProvider::new("secret")))
///     .build()?;
///
/// let response = client.execute(RequestSpec::get("process-instances/42")).await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthenticatedClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    tokens: SharedTokenProvider,
    timeout: Duration,
}

impl AuthenticatedClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resource accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the process instances API.
    pub fn process_instances(&self) -> ProcessInstancesApi {
        ProcessInstancesApi::new(self.clone())
    }

    /// Access the variables API.
    pub fn variables(&self) -> VariablesApi {
        VariablesApi::new(self.clone())
    }

    /// Access the user tasks API.
    pub fn tasks(&self) -> TasksApi {
        TasksApi::new(self.clone())
    }

    /// Access the subprocesses API.
    pub fn subprocesses(&self) -> SubprocessesApi {
        SubprocessesApi::new(self.clone())
    }

    /// Access the events API.
    pub fn events(&self) -> EventsApi {
        EventsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Execution
    // ─────────────────────────────────────────────────────────────────────────

    /// Perform one authenticated call and return the raw response.
    ///
    /// Fails with [`Error::Auth`] if no token can be obtained (nothing is
    /// sent) and with [`Error::Transport`] if the call itself fails or
    /// times out. Any HTTP status, including 4xx/5xx, is returned as-is.
    pub async fn execute(&self, spec: RequestSpec) -> Result<ApiResponse> {
        let token = self.inner.tokens.get_valid_token().await?;

        let url = self.url(&spec.endpoint)?;
        let headers = build_headers(&spec, &token)?;
        let timeout = spec.timeout.unwrap_or(self.inner.timeout);

        let mut request = self
            .inner
            .http
            .request(spec.method.clone(), url.clone())
            .headers(headers)
            .timeout(timeout);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.json {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| Error::InvalidRequest(format!("Unserializable body: {}", e)))?;
            request = request.body(bytes);
        }

        tracing::debug!(method = %spec.method, url = %url, "Sending authenticated request");
        let response = request.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(method = %spec.method, url = %url, status = status.as_u16(), "Received response");

        Ok(ApiResponse::new(status, headers, body))
    }

    /// Resolve an endpoint against the base URL.
    pub(crate) fn url(&self, endpoint: &str) -> Result<Url> {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return Url::parse(endpoint)
                .map_err(|e| Error::InvalidRequest(format!("Invalid URL '{}': {}", endpoint, e)));
        }

        self.inner
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| Error::InvalidRequest(format!("Invalid endpoint '{}': {}", endpoint, e)))
    }

    /// Build a URL under the base from literal path segments.
    ///
    /// Each segment is percent-encoded as a whole, so `/`, `?` and `#` in an
    /// ID stay inside that segment. Empty, `.` and `..` segments are refused.
    pub fn resource_url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidRequest(format!("Invalid path segment '{}'", bad)));
        }

        let base = &self.inner.base_url;
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidRequest(format!("Base URL '{}' cannot have a path", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("tokens", &self.inner.tokens)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

/// Merge caller headers with the bearer token and a default JSON content type.
pub(crate) fn build_headers(spec: &RequestSpec, token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    // Repeated caller headers keep every value.
    for (name, value) in &spec.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidRequest(format!("Invalid header name '{}'", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::InvalidRequest(format!("Invalid value for header '{}'", name)))?;
        headers.append(name, value);
    }

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
        AuthError::MalformedResponse("access token is not a valid header value".to_string())
    })?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    if spec.json.is_some() && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok(headers)
}

/// Builder for creating an [`AuthenticatedClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    tokens: Option<SharedTokenProvider>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            tokens: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL of the engine API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the token provider consulted before every call.
    pub fn token_provider(mut self, tokens: SharedTokenProvider) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AuthenticatedClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let tokens = self
            .tokens
            .ok_or_else(|| Error::Config("token_provider is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid base_url '{}': {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("procview-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(AuthenticatedClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                tokens,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
