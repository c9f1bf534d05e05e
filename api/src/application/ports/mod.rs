pub mod account_repository;
pub mod constraint;
pub mod customer_repository;
pub mod import_history_repository;
pub mod membership_repository;
pub mod notification_repository;
pub mod product_repository;
pub mod report_repository;
pub mod reward_repository;
pub mod transaction_repository;
