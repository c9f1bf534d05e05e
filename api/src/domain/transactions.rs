use serde::{Deserialize, Serialize};

use crate::domain::products::Product;
use crate::domain::rewards::Reward;

pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";
pub const POINTS_PAYMENT_METHOD: &str = "Points";
pub const PAYMENT_SUCCESS: &str = "Success";

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub product_id: Option<i64>,
    pub reward_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub points_delta: i64,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

/// Historical sale brought in by an import; carries no ids and moves no balance.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTransaction {
    pub occurred_at: chrono::DateTime<chrono::Utc>,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: i64,
    pub payment_method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Sale,
    Redemption,
}

/// Effect of one purchase on the books and on the customer's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsChange {
    pub kind: LedgerKind,
    pub total_price: i64,
    /// Positive when points are earned, negative when spent.
    pub delta: i64,
}

impl PointsChange {
    pub fn earned(&self) -> i64 {
        self.delta.max(0)
    }

    pub fn spent(&self) -> i64 {
        (-self.delta).max(0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PointsPolicy {
    /// Rupiah per earned point.
    pub earning_rate: i64,
}

impl PointsPolicy {
    pub fn new(earning_rate: i64) -> Self {
        Self {
            earning_rate: earning_rate.max(1),
        }
    }

    pub fn assess_product(&self, product: &Product, quantity: i64) -> Result<PointsChange, String> {
        let quantity = check_quantity(quantity)?;
        let total_price = product
            .unit_price
            .unwrap_or(0)
            .checked_mul(quantity)
            .ok_or_else(|| "total price overflows".to_string())?;

        if product.is_redeemable() {
            let cost = product
                .exchange_points
                .checked_mul(quantity)
                .ok_or_else(|| "point cost overflows".to_string())?;
            Ok(PointsChange {
                kind: LedgerKind::Redemption,
                total_price,
                delta: -cost,
            })
        } else {
            Ok(PointsChange {
                kind: LedgerKind::Sale,
                total_price,
                delta: total_price.max(0) / self.earning_rate,
            })
        }
    }

    pub fn assess_reward(&self, reward: &Reward, quantity: i64) -> Result<PointsChange, String> {
        let quantity = check_quantity(quantity)?;
        let cost = reward
            .points_required
            .checked_mul(quantity)
            .ok_or_else(|| "point cost overflows".to_string())?;
        Ok(PointsChange {
            kind: LedgerKind::Redemption,
            total_price: 0,
            delta: -cost,
        })
    }
}

fn check_quantity(quantity: i64) -> Result<i64, String> {
    if quantity < 1 {
        Err("quantity must be at least 1".into())
    } else {
        Ok(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(exchange_points: i64, unit_price: Option<i64>) -> Product {
        Product {
            id: 1,
            name: "Kopi Susu".into(),
            category: "Coffee".into(),
            notes: None,
            exchange_points,
            unit_price,
        }
    }

    #[test]
    fn sale_earns_floor_of_total_over_rate() {
        let policy = PointsPolicy::new(10_000);
        let change = policy.assess_product(&product(0, Some(18_000)), 3).unwrap();
        assert_eq!(change.kind, LedgerKind::Sale);
        assert_eq!(change.total_price, 54_000);
        assert_eq!(change.delta, 5);
        assert_eq!(change.earned(), 5);
        assert_eq!(change.spent(), 0);
    }

    #[test]
    fn sale_below_rate_earns_nothing() {
        let policy = PointsPolicy::new(10_000);
        let change = policy.assess_product(&product(0, Some(9_999)), 1).unwrap();
        assert_eq!(change.delta, 0);
    }

    #[test]
    fn unpriced_product_totals_zero() {
        let policy = PointsPolicy::new(10_000);
        let change = policy.assess_product(&product(0, None), 2).unwrap();
        assert_eq!(change.total_price, 0);
        assert_eq!(change.delta, 0);
    }

    #[test]
    fn redeemable_product_spends_points() {
        let policy = PointsPolicy::new(10_000);
        let change = policy.assess_product(&product(25, Some(20_000)), 2).unwrap();
        assert_eq!(change.kind, LedgerKind::Redemption);
        assert_eq!(change.delta, -50);
        assert_eq!(change.spent(), 50);
        assert_eq!(change.total_price, 40_000);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let policy = PointsPolicy::new(10_000);
        assert!(policy.assess_product(&product(0, Some(1)), 0).is_err());
    }

    #[test]
    fn reward_costs_points_and_no_money() {
        let policy = PointsPolicy::new(10_000);
        let reward = Reward {
            id: 7,
            name: "Free Croissant".into(),
            points_required: 40,
            stock: 3,
            claimed: 0,
        };
        let change = policy.assess_reward(&reward, 2).unwrap();
        assert_eq!(change.delta, -80);
        assert_eq!(change.total_price, 0);
    }
}
