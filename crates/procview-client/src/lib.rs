//! Authenticated HTTP client for the workflow engine API.
//!
//! [`AuthenticatedClient`] attaches a bearer token from a
//! [`TokenProvider`](procview_auth::TokenProvider) to every outbound call
//! and returns the raw response. Authentication and transport failures are
//! reported as distinct [`Error`] variants; HTTP status codes are left to
//! the caller.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use procview_auth::{Credentials, TokenManager};
//! use procview_client::{AuthenticatedClient, EventScope};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("https://idp.example.com/oauth/token", "procview", "secret")?;
//! let tokens = Arc::new(TokenManager::new(credentials)?);
//!
//! let client = AuthenticatedClient::builder()
//!     .base_url("https://engine.example.com/engine-rest/")
//!     .token_provider(tokens)
//!     .build()?;
//!
//! if let Some(instance) = client.process_instances().get("42").await? {
//!     println!("{} is {:?}", instance.id, instance.status);
//! }
//!
//! let failures = client
//!     .events()
//!     .list(EventScope::ProcessInstance, "42", Some("fail"))
//!     .await?;
//! println!("{} failure events", failures.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Resources
//!
//! - **Process instances**: instance card by ID
//! - **Variables**: process or task scoped
//! - **Tasks**: user tasks of a process instance
//! - **Subprocesses**: children of a process instance
//! - **Events**: history of a process instance or task, with text filter

pub mod api;
pub mod client;
pub mod error;
pub mod request;
pub mod types;

pub use client::{AuthenticatedClient, ClientBuilder, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use request::{ApiResponse, RequestSpec};
pub use types::*;
