//! Client-side form validation for employee drafts.
//!
//! Runs before dispatch: a draft that fails here is never sent to the
//! store or the server. All failing fields are reported at once so a form
//! can mark every invalid input in a single pass.

use super::model::EmployeeDraft;
use crate::error::{FieldError, Result, StaffdeckError};

/// Validates a draft against the form rules.
///
/// Rules:
/// - `name`: required, non-blank
/// - `email`: required, must look like `local@domain.tld`
/// - `designation`: required, non-blank
/// - `salary`: positive finite number
///
/// # Returns
///
/// - `Ok(())`: every rule passed
/// - `Err(StaffdeckError::Validation)`: all failing fields, in form order
pub fn validate_draft(draft: &EmployeeDraft) -> Result<()> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Full name is required"));
    }

    if draft.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !email_looks_valid(&draft.email) {
        errors.push(FieldError::new("email", "Email is invalid"));
    }

    if draft.designation.trim().is_empty() {
        errors.push(FieldError::new("designation", "Designation is required"));
    }

    if !(draft.salary.is_finite() && draft.salary > 0.0) {
        errors.push(FieldError::new("salary", "Salary must be a positive number"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StaffdeckError::Validation(errors))
    }
}

/// Same shape check the original form applies: a non-whitespace local
/// part, then a domain containing at least one dot.
fn email_looks_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let valid_part = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    valid_part(local) && valid_part(host) && valid_part(tld)
}
