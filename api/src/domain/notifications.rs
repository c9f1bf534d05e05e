#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub message: String,
    pub customer_id: Option<i64>,
}
