pub mod create_notification;
pub mod delete_notification;
pub mod get_notification;
pub mod import_notifications;
pub mod list_notifications;
pub mod update_notification;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::customer_repository::CustomerRepository;

pub(crate) async fn ensure_customer<C: CustomerRepository + ?Sized>(
    customers: &C,
    id: i64,
) -> AppResult<()> {
    if customers.get(id).await?.is_none() {
        return Err(AppError::not_found("customer not found"));
    }
    Ok(())
}
