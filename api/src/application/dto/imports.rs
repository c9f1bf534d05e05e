use serde::Serialize;

/// A source row that could not be turned into a record. `row` is the
/// 1-based line (CSV) or element position (JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub imported: u64,
    /// Valid rows that hit an existing record and were left alone.
    pub skipped: u64,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn status(&self) -> ImportStatus {
        if self.imported == 0 && !self.rejected.is_empty() {
            ImportStatus::Failed
        } else if self.rejected.is_empty() {
            ImportStatus::Success
        } else {
            ImportStatus::Partial
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Success,
    Partial,
    Failed,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStatus::Success => "Success",
            ImportStatus::Partial => "Partial",
            ImportStatus::Failed => "Failed",
        }
    }
}

/// Entity an import targets, as stored in the import history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Customers,
    Products,
    Memberships,
    Rewards,
    Notifications,
    Transactions,
    SalesReport,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Customers => "Customers",
            ImportKind::Products => "Products",
            ImportKind::Memberships => "Memberships",
            ImportKind::Rewards => "Rewards",
            ImportKind::Notifications => "Notifications",
            ImportKind::Transactions => "Transactions",
            ImportKind::SalesReport => "SalesReport",
        }
    }
}

/// Request body of an import endpoint before normalization.
#[derive(Debug, Clone)]
pub enum ImportBody {
    Json(serde_json::Value),
    Csv(String),
}

#[derive(Debug, Clone)]
pub struct ImportPayload {
    /// File name for CSV uploads, `json` for JSON bodies.
    pub source: String,
    pub body: ImportBody,
}
