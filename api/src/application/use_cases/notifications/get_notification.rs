use crate::application::error::{AppError, AppResult};
use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::Notification;

pub struct GetNotification<'a, N: NotificationRepository + ?Sized> {
    pub repo: &'a N,
}

impl<'a, N: NotificationRepository + ?Sized> GetNotification<'a, N> {
    pub async fn execute(&self, id: i64) -> AppResult<Notification> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("notification not found"))
    }
}
