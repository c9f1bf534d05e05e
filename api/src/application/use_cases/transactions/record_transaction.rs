use super::settle;
use crate::application::dto::ledger::LedgerReceipt;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::product_repository::ProductRepository;
use crate::application::ports::transaction_repository::{LedgerEntry, TransactionRepository};
use crate::application::use_cases::non_blank;
use crate::domain::transactions::{DEFAULT_PAYMENT_METHOD, PointsPolicy};

/// Sale or product redemption against one customer's balance.
pub struct RecordTransaction<'a, P, T>
where
    P: ProductRepository + ?Sized,
    T: TransactionRepository + ?Sized,
{
    pub products: &'a P,
    pub ledger: &'a T,
    pub policy: PointsPolicy,
}

#[derive(Debug, Clone, Default)]
pub struct RecordTransactionRequest {
    pub customer_id: Option<i64>,
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub payment_method: Option<String>,
}

impl<'a, P, T> RecordTransaction<'a, P, T>
where
    P: ProductRepository + ?Sized,
    T: TransactionRepository + ?Sized,
{
    pub async fn execute(&self, req: &RecordTransactionRequest) -> AppResult<LedgerReceipt> {
        let (Some(customer_id), Some(product_id), Some(quantity)) =
            (req.customer_id, req.product_id, req.quantity)
        else {
            return Err(AppError::validation(
                "customer, product and quantity are required",
            ));
        };
        if quantity < 1 {
            return Err(AppError::validation("quantity must be at least 1"));
        }
        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product not found"))?;
        let change = self
            .policy
            .assess_product(&product, quantity)
            .map_err(AppError::Validation)?;

        let entry = LedgerEntry {
            customer_id,
            product_id: Some(product.id),
            reward_id: None,
            product_name: product.name.clone(),
            quantity,
            total_price: change.total_price,
            payment_method: non_blank(req.payment_method.as_deref())
                .unwrap_or(DEFAULT_PAYMENT_METHOD)
                .to_string(),
            points_delta: change.delta,
        };
        let outcome = self.ledger.apply(&entry).await?;
        settle(change, outcome)
    }
}
