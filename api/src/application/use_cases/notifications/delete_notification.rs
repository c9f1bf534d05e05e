use crate::application::error::{AppError, AppResult};
use crate::application::ports::notification_repository::NotificationRepository;

pub struct DeleteNotification<'a, N: NotificationRepository + ?Sized> {
    pub repo: &'a N,
}

impl<'a, N: NotificationRepository + ?Sized> DeleteNotification<'a, N> {
    pub async fn execute(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("notification not found"));
        }
        Ok(())
    }
}
