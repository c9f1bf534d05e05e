pub mod auth;
pub mod customers;
pub mod import_support;
pub mod memberships;
pub mod notifications;
pub mod products;
pub mod reports;
pub mod rewards;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_support;

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}
