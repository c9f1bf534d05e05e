pub mod imports;
pub mod ledger;
