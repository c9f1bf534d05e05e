use super::ensure_customer;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::use_cases::non_blank;
use crate::domain::notifications::Notification;

pub struct UpdateNotification<'a, N, C>
where
    N: NotificationRepository + ?Sized,
    C: CustomerRepository + ?Sized,
{
    pub repo: &'a N,
    pub customers: &'a C,
}

impl<'a, N, C> UpdateNotification<'a, N, C>
where
    N: NotificationRepository + ?Sized,
    C: CustomerRepository + ?Sized,
{
    // customer_id: None => unchanged; Some(None) => detach; Some(Some(id)) => reassign
    pub async fn execute(
        &self,
        id: i64,
        message: Option<&str>,
        customer_id: Option<Option<i64>>,
    ) -> AppResult<Notification> {
        let message = match message {
            Some(raw) => Some(
                non_blank(Some(raw))
                    .ok_or_else(|| AppError::validation("message cannot be empty"))?
                    .to_string(),
            ),
            None => None,
        };
        if let Some(Some(cid)) = customer_id {
            ensure_customer(self.customers, cid).await?;
        }
        self.repo
            .update(id, message, customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("notification not found"))
    }
}
