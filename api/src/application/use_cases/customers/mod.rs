pub mod create_customer;
pub mod delete_customer;
pub mod get_customer;
pub mod import_customers;
pub mod list_customers;
pub mod update_customer;

/// Body of create and update. Absent fields keep their current value on
/// update; an empty email clears it.
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub points: Option<i64>,
}
