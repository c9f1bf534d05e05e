#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub tier: String,
    pub required_points: i64,
    pub discount_percent: f64,
    pub member_count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMembership {
    pub tier: String,
    pub required_points: i64,
    pub discount_percent: f64,
}

pub fn validate_discount(discount_percent: f64) -> Result<f64, String> {
    if discount_percent.is_finite() && (0.0..=100.0).contains(&discount_percent) {
        Ok(discount_percent)
    } else {
        Err("discount must be between 0 and 100 percent".into())
    }
}
