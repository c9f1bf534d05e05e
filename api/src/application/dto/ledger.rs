use crate::domain::transactions::{LedgerKind, Transaction};

#[derive(Debug, Clone)]
pub struct LedgerReceipt {
    pub kind: LedgerKind,
    pub transaction: Transaction,
    pub earned: i64,
    pub spent: i64,
    pub new_balance: i64,
    pub tier: Option<String>,
}
