//! Authentication domain: session model and API seam.

pub mod api;
pub mod model;

pub use api::AuthApi;
pub use model::Session;
