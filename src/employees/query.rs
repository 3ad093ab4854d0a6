//! In-memory queries over the full employee list.

use crate::employees::types::Employee;

/// Number of names returned by the top earners query.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `query`, ignoring case.
///
/// Employees without a name never match. Source order is preserved.
pub fn search_by_name(employees: &[Employee], query: &str) -> Vec<Employee> {
    let needle = query.to_lowercase();
    employees
        .iter()
        .filter(|e| {
            e.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Highest salary present in the list, or 0 when there is none.
pub fn highest_salary(employees: &[Employee]) -> u32 {
    employees
        .iter()
        .filter_map(|e| e.salary)
        .max()
        .unwrap_or(0)
}

/// Names of the `limit` best paid employees, highest salary first.
///
/// Employees missing a name or a salary are skipped. Equal salaries keep
/// their original relative order.
pub fn top_earning_names(employees: &[Employee], limit: usize) -> Vec<String> {
    let mut earners: Vec<(&str, u32)> = employees
        .iter()
        .filter_map(|e| Some((e.name.as_deref()?, e.salary?)))
        .collect();

    // sort_by is stable
    earners.sort_by(|a, b| b.1.cmp(&a.1));

    earners
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}
