//! OAuth 2.0 client-credentials token management for procview.
//!
//! The only component that talks to the identity provider. It obtains a
//! bearer token, caches it in memory and fetches a fresh one lazily once the
//! cached token is within [`EXPIRY_BUFFER_SECS`] of its declared expiry.
//!
//! # Components
//!
//! - [`credentials`]: immutable client id/secret/scope and the grant request
//! - [`token_manager`]: the cached token slot and the [`TokenProvider`] seam
//! - [`clock`]: injectable time source for expiry checks
//!
//! # Example
//!
//! ```no_run
//! use procview_auth::{Credentials, TokenManager};
//!
//! # async fn example() -> procview_auth::Result<()> {
//! let credentials = Credentials::new("https://idp.example.com/oauth/token", "procview", "secret")?
//!     .with_scope("engine:read");
//! let manager = TokenManager::new(credentials)?;
//!
//! let token = manager.get_valid_token().await?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod credentials;
pub mod error;
pub mod token_manager;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use credentials::{Credentials, DEFAULT_EXPIRES_IN_SECS, DEFAULT_TOKEN_TIMEOUT};
pub use error::{AuthError, Result};
pub use token_manager::{
    EXPIRY_BUFFER_SECS, SharedTokenProvider, StaticTokenProvider, TokenInfo, TokenManager,
    TokenProvider,
};
