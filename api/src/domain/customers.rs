use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub points: i64,
    pub tier: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub points: i64,
}

/// Update payload. `points: None` leaves the stored balance untouched so a
/// concurrent ledger write is never overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPatch {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub points: Option<i64>,
}

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{6,15}$").expect("phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Strips spaces, dashes, dots and parentheses, then checks for 6-15 digits
/// with an optional leading `+`. Leading zeros are kept.
pub fn normalize_phone(raw: &str) -> Result<String, String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    if PHONE_RE.is_match(&compact) {
        Ok(compact)
    } else {
        Err(format!("invalid phone number '{}'", raw.trim()))
    }
}

pub fn normalize_email(raw: &str) -> Result<Option<String>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if EMAIL_RE.is_match(trimmed) {
        Ok(Some(trimmed.to_lowercase()))
    } else {
        Err(format!("invalid email '{}'", trimmed))
    }
}
