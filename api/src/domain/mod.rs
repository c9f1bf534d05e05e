pub mod accounts;
pub mod customers;
pub mod memberships;
pub mod notifications;
pub mod products;
pub mod reports;
pub mod rewards;
pub mod transactions;
