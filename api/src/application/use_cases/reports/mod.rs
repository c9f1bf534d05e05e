pub mod get_sales_summary;
pub mod import_sales_report;
pub mod list_import_history;
