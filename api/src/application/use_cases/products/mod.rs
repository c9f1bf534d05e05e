pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod import_products;
pub mod list_products;
pub mod update_product;

use crate::application::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub exchange_points: Option<i64>,
    pub unit_price: Option<i64>,
}

pub(crate) fn check_amounts(exchange_points: i64, unit_price: Option<i64>) -> AppResult<()> {
    if exchange_points < 0 {
        return Err(AppError::validation("exchange points cannot be negative"));
    }
    if unit_price.is_some_and(|p| p < 0) {
        return Err(AppError::validation("price cannot be negative"));
    }
    Ok(())
}
