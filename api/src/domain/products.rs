#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub notes: Option<String>,
    /// Price in points; a product with a positive value is bought with points.
    pub exchange_points: i64,
    /// Whole rupiah.
    pub unit_price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub notes: Option<String>,
    pub exchange_points: i64,
    pub unit_price: Option<i64>,
}

impl Product {
    pub fn is_redeemable(&self) -> bool {
        self.exchange_points > 0
    }
}
