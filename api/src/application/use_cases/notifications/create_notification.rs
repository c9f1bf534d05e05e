use super::ensure_customer;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::use_cases::non_blank;
use crate::domain::notifications::{NewNotification, Notification};

pub struct CreateNotification<'a, N, C>
where
    N: NotificationRepository + ?Sized,
    C: CustomerRepository + ?Sized,
{
    pub repo: &'a N,
    pub customers: &'a C,
}

impl<'a, N, C> CreateNotification<'a, N, C>
where
    N: NotificationRepository + ?Sized,
    C: CustomerRepository + ?Sized,
{
    pub async fn execute(
        &self,
        message: Option<&str>,
        customer_id: Option<i64>,
    ) -> AppResult<Notification> {
        let message = non_blank(message).ok_or_else(|| AppError::validation("message is required"))?;
        if let Some(id) = customer_id {
            ensure_customer(self.customers, id).await?;
        }
        Ok(self
            .repo
            .create(&NewNotification {
                message: message.to_string(),
                customer_id,
            })
            .await?)
    }
}
