//! Employee domain: model, API seam, search filtering, form validation.

pub mod api;
pub mod filter;
pub mod model;
pub mod validate;

pub use api::EmployeeApi;
pub use filter::filter_employees;
pub use model::{Employee, EmployeeDraft, EmployeePage, EmployeeStats};
pub use validate::validate_draft;
