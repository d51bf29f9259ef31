//! Employee domain model.
//!
//! Represents employee records as returned by the server, plus the
//! client-side draft shape submitted on create/update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employee domain model.
///
/// `id`, `created_at` and `updated_at` are server-assigned; the client
/// never generates an id. Within the in-memory collection ids are unique
/// and order is fetch/insertion order, not guaranteed sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Server-assigned unique identifier
    pub id: i64,
    /// Full name
    pub name: String,
    /// Contact email address
    pub email: String,
    /// Job title
    pub designation: String,
    /// Salary, positive decimal
    pub salary: f64,
    /// Whether the employee is currently active
    pub is_active: bool,
    /// Record creation timestamp (server clock)
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (server clock)
    pub updated_at: DateTime<Utc>,
}

/// Client-submitted payload for creating or updating an employee.
///
/// Only the fields the client owns; identity and timestamps come back in
/// the server's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub designation: String,
    pub salary: f64,
}

/// One page of the server's paginated employee listing.
///
/// The client only ever requests page 1 with a page size of 100, but the
/// response body carries the full pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePage {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub employees: Vec<Employee>,
}

/// Dashboard aggregation over the employee collection.
///
/// A pure projection; computing it never touches the underlying data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmployeeStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub total_salary: f64,
}

impl EmployeeStats {
    /// Aggregates totals the way the dashboard displays them.
    pub fn from_employees(employees: &[Employee]) -> Self {
        let active = employees.iter().filter(|e| e.is_active).count();
        Self {
            total: employees.len(),
            active,
            inactive: employees.len() - active,
            total_salary: employees.iter().map(|e| e.salary).sum(),
        }
    }
}
