//! Search filtering over the employee collection.
//!
//! Filtering is a pure projection for display: it derives a filtered view
//! from the collection and the current query, and never mutates the
//! underlying data.

use super::model::Employee;

/// Returns the employees matching `query` as a case-insensitive substring
/// of name, email, or designation (OR-combined), preserving order.
///
/// An empty or whitespace-only query matches everything, so the full
/// collection comes back unfiltered.
pub fn filter_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return employees.iter().collect();
    }
    employees
        .iter()
        .filter(|e| {
            e.name.to_lowercase().contains(&needle)
                || e.email.to_lowercase().contains(&needle)
                || e.designation.to_lowercase().contains(&needle)
        })
        .collect()
}
