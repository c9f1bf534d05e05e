use crate::application::error::AppResult;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::Notification;

pub struct ListNotifications<'a, N: NotificationRepository + ?Sized> {
    pub repo: &'a N,
}

impl<'a, N: NotificationRepository + ?Sized> ListNotifications<'a, N> {
    pub async fn execute(
        &self,
        customer_id: Option<i64>,
        search: Option<String>,
    ) -> AppResult<Vec<Notification>> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self.repo.list(customer_id, search).await?)
    }
}
