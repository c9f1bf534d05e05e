/// A PostgreSQL integrity-constraint failure, carried inside `anyhow::Error`
/// by the sqlx repositories so use cases can tell it apart from outages.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind:?} constraint violated: {}", constraint.as_deref().unwrap_or("unnamed"))]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    pub constraint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
}

impl ConstraintViolation {
    pub fn new(kind: ConstraintKind, constraint: Option<&str>) -> Self {
        Self {
            kind,
            constraint: constraint.map(str::to_string),
        }
    }

    /// Client-facing wording for the named constraints of the schema.
    pub fn describe(&self) -> String {
        let known = match self.constraint.as_deref() {
            Some("customers_phone_key") => Some("phone number is already registered"),
            Some("customers_email_key") => Some("email is already registered"),
            Some("customers_points_check") => Some("point balance cannot go negative"),
            Some("customers_tier_fkey") => Some("membership tier still has members"),
            Some("memberships_pkey") => Some("membership tier already exists"),
            Some("products_name_key") => Some("a product with this name already exists"),
            Some("rewards_name_key") => Some("a reward with this name already exists"),
            Some("rewards_stock_check") => Some("reward stock cannot go negative"),
            Some("transactions_customer_id_fkey") => Some("customer has transaction history"),
            Some("transactions_product_id_fkey") => Some("product has transaction history"),
            Some("transactions_reward_id_fkey") => Some("reward has transaction history"),
            Some("notifications_customer_id_fkey") => Some("customer not found"),
            Some("owners_username_key") | Some("staff_username_key") => {
                Some("username is already registered")
            }
            Some("owners_email_key") | Some("staff_email_key") => {
                Some("email is already registered")
            }
            _ => None,
        };
        match (known, self.kind) {
            (Some(msg), _) => msg.to_string(),
            (None, ConstraintKind::Unique) => "record already exists".into(),
            (None, ConstraintKind::ForeignKey) => "record is still referenced".into(),
            (None, ConstraintKind::Check) => "value out of range".into(),
        }
    }
}
