//! UserProfile domain model.
//!
//! Represents the authenticated user as returned by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user profile.
///
/// Immutable from the client's perspective: the client never edits a
/// profile, it only replaces it wholesale with the server's response on
/// login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned identifier
    pub id: i64,
    /// Login name
    pub username: String,
    /// Contact email address
    pub email: String,
    /// Authorization role label
    pub role: String,
    /// Whether the account is active
    pub is_active: bool,
    /// Account creation timestamp (server clock)
    pub created_at: DateTime<Utc>,
}
