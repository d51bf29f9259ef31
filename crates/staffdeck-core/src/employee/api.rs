//! Employee API trait.
//!
//! Defines the interface the employee store uses to reach the server's
//! employee resource endpoints.

use super::model::{Employee, EmployeeDraft, EmployeePage};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the server's employee endpoints.
///
/// This trait decouples the employee store from the HTTP transport so the
/// store can be tested against an in-memory implementation. Each method is
/// a single fire-and-forget request: no retries, no queueing, no
/// deduplication — one call, one resolution, one state transition.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    /// Fetches one page of the employee listing.
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `page_size` - number of records per page
    ///
    /// # Returns
    ///
    /// - `Ok(EmployeePage)`: the page envelope with employees in server order
    /// - `Err(_)`: the server rejected the request or was unreachable
    async fn list(&self, page: u32, page_size: u32) -> Result<EmployeePage>;

    /// Creates a new employee record.
    ///
    /// # Returns
    ///
    /// - `Ok(Employee)`: the server's representation, including the
    ///   server-assigned id and timestamps
    /// - `Err(_)`: the server rejected the request or was unreachable
    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee>;

    /// Replaces the employee record with the given id.
    ///
    /// # Returns
    ///
    /// - `Ok(Employee)`: the updated server representation
    /// - `Err(_)`: the server rejected the request or was unreachable
    async fn update(&self, id: i64, draft: &EmployeeDraft) -> Result<Employee>;

    /// Deletes the employee record with the given id.
    async fn delete(&self, id: i64) -> Result<()>;
}
