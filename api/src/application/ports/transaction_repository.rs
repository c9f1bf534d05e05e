use async_trait::async_trait;

use crate::domain::transactions::{ImportedTransaction, Transaction};

/// One balance-moving write: the transaction row, the point delta, and for
/// reward redemptions the stock movement.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub customer_id: i64,
    pub product_id: Option<i64>,
    pub reward_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: i64,
    pub payment_method: String,
    pub points_delta: i64,
}

#[derive(Debug, Clone)]
pub enum LedgerOutcome {
    Recorded {
        transaction: Transaction,
        new_balance: i64,
        tier: Option<String>,
    },
    CustomerNotFound,
    RewardNotFound,
    InsufficientPoints {
        required: i64,
        available: i64,
    },
    OutOfStock {
        available: i64,
    },
    /// The resulting balance would not fit in an `i64`.
    BalanceOverflow,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub customer_id: Option<i64>,
    pub start: Option<chrono::NaiveDate>,
    pub end: Option<chrono::NaiveDate>,
    pub limit: i64,
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Applies the entry atomically under a row lock on the customer (and
    /// reward). Nothing is written unless the outcome is `Recorded`.
    async fn apply(&self, entry: &LedgerEntry) -> anyhow::Result<LedgerOutcome>;
    async fn list(&self, filter: &TransactionFilter) -> anyhow::Result<Vec<Transaction>>;
    async fn import(&self, rows: &[ImportedTransaction]) -> anyhow::Result<u64>;
}
