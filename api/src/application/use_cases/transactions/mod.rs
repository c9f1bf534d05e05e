pub mod import_transactions;
pub mod list_transactions;
pub mod record_transaction;

use crate::application::dto::ledger::LedgerReceipt;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::transaction_repository::LedgerOutcome;
use crate::domain::transactions::PointsChange;

/// Turns the repository's verdict on a ledger entry into a receipt or the
/// matching client error.
pub(crate) fn settle(change: PointsChange, outcome: LedgerOutcome) -> AppResult<LedgerReceipt> {
    match outcome {
        LedgerOutcome::Recorded {
            transaction,
            new_balance,
            tier,
        } => {
            tracing::info!(
                transaction_id = transaction.id,
                customer_id = ?transaction.customer_id,
                kind = ?change.kind,
                points_delta = change.delta,
                new_balance,
                "transaction_recorded"
            );
            Ok(LedgerReceipt {
                kind: change.kind,
                transaction,
                earned: change.earned(),
                spent: change.spent(),
                new_balance,
                tier,
            })
        }
        LedgerOutcome::CustomerNotFound => Err(AppError::not_found("customer not found")),
        LedgerOutcome::RewardNotFound => Err(AppError::not_found("reward not found")),
        LedgerOutcome::InsufficientPoints {
            required,
            available,
        } => Err(AppError::InsufficientPoints {
            required,
            available,
        }),
        LedgerOutcome::OutOfStock { available } => Err(AppError::OutOfStock { available }),
        LedgerOutcome::BalanceOverflow => Err(AppError::validation(
            "point balance would exceed the supported maximum",
        )),
    }
}
