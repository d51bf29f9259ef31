//! Session domain model.

use crate::user::UserProfile;
use serde::{Deserialize, Serialize};

/// An authenticated session: bearer token plus the profile it belongs to.
///
/// Token and user are both-or-neither by construction; a server response
/// containing one without the other is an inconsistent server error, never
/// a valid partial state, so the type does not allow representing it.
/// Session storage mirrors this pair as a cache — the source of truth is
/// always the last server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the server
    pub token: String,
    /// Profile of the authenticated user
    pub user: UserProfile,
}
