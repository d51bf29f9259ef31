//! Domain layer of the Staffdeck client.
//!
//! Holds the models, the shared error type, the trait seams the
//! infrastructure layer implements (API clients, storage scopes), and the
//! pure projections (search filter, dashboard stats, form validation) the
//! view layer reads through.

pub mod auth;
pub mod employee;
pub mod error;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::{FieldError, Result, StaffdeckError};
