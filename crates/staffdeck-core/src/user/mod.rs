//! Authenticated user domain.

pub mod model;

pub use model::UserProfile;
