//! Application layer of the Staffdeck client.
//!
//! The two state containers the view layer renders from and dispatches
//! intents to — authentication and the employee collection — plus the
//! composition root that wires them to the HTTP client and the two
//! storage scopes.

pub mod auth_store;
pub mod context;
pub mod employee_store;

#[cfg(test)]
mod test_support;

pub use auth_store::{AuthPhase, AuthState, AuthStore};
pub use context::AppContext;
pub use employee_store::{EmployeeOp, EmployeeStore};

/// How an intent resolved with respect to the store's state.
///
/// Failures are not a variant here: an operation that reached the server
/// and was rejected still `Completed` — the outcome lives in the store's
/// error field, never as a propagated fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    /// The operation resolved and its state transition was applied
    /// (success or recorded failure).
    Completed,
    /// The owning scope was cancelled before the result could be applied;
    /// state was left untouched.
    Cancelled,
    /// The result arrived after a newer change and was discarded.
    Superseded,
}

impl OpStatus {
    /// Whether the operation ran to a state transition.
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}
