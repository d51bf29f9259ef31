//! Authentication API trait.

use crate::error::Result;
use crate::user::UserProfile;
use async_trait::async_trait;

/// An abstract client for the server's authentication endpoints.
///
/// Decouples the auth store from the HTTP transport. Login is a two-step
/// exchange: `login` yields a bearer token, `me` resolves the profile that
/// token belongs to.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the opaque access token
    /// - `Err(_)`: rejected credentials or an unreachable server
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Fetches the profile for an explicit token.
    ///
    /// The token is passed explicitly because this call happens mid-login,
    /// before the shared token slot has been updated.
    async fn me(&self, token: &str) -> Result<UserProfile>;

    /// Invalidates the current server-side session.
    ///
    /// Callers de-authenticate locally whether or not this succeeds.
    async fn logout(&self) -> Result<()>;
}
