use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const CURRENCY_PREFIXES: [&str; 4] = ["idr", "rp", "usd", "$"];

/// Sign, integer digits and fraction digits of a loosely formatted number.
struct SplitNumber {
    negative: bool,
    int_digits: String,
    frac_digits: String,
}

/// Accepts `10000`, `10.000`, `10,000`, `10.000,50`, `10,000.50` and
/// `Rp 10.000`. With both separators the last one is the decimal mark; with
/// one kind only, repeats or a three-digit tail mean thousands.
fn split_number(raw: &str) -> Result<SplitNumber, String> {
    let mut s = raw.trim().to_lowercase();
    let negative = s.starts_with('-');
    if negative {
        s.remove(0);
    }
    for prefix in CURRENCY_PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim_start_matches('.').to_string();
            break;
        }
    }
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return Err(format!("'{}' is not a number", raw.trim()));
    }

    let last_dot = s.rfind('.');
    let last_comma = s.rfind(',');
    let decimal_at = match (last_dot, last_comma) {
        (Some(d), Some(c)) => Some(d.max(c)),
        (Some(i), None) | (None, Some(i)) => {
            let sep = s.as_bytes()[i];
            let repeats = s.bytes().filter(|b| *b == sep).count() > 1;
            let tail = s.len() - i - 1;
            if repeats || tail == 3 { None } else { Some(i) }
        }
        (None, None) => None,
    };

    let (int_part, frac_part) = match decimal_at {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s.as_str(), ""),
    };
    let int_digits: String = int_part.chars().filter(char::is_ascii_digit).collect();
    if frac_part.contains(['.', ',']) {
        return Err(format!("'{}' is not a number", raw.trim()));
    }
    if int_digits.is_empty() && frac_part.is_empty() {
        return Err(format!("'{}' is not a number", raw.trim()));
    }
    Ok(SplitNumber {
        negative,
        int_digits,
        frac_digits: frac_part.to_string(),
    })
}

fn digits_to_i64(digits: &str, raw: &str) -> Result<i64, String> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<i64>()
        .map_err(|_| format!("'{}' is out of range", raw.trim()))
}

/// Money in whole rupiah, rounded half up.
pub fn parse_amount(raw: &str) -> Result<i64, String> {
    let n = split_number(raw)?;
    let mut value = digits_to_i64(&n.int_digits, raw)?;
    if n.frac_digits.chars().next().is_some_and(|c| c >= '5') {
        value = value
            .checked_add(1)
            .ok_or_else(|| format!("'{}' is out of range", raw.trim()))?;
    }
    Ok(if n.negative { -value } else { value })
}

/// Whole counts (points, quantities, stock). Thousand separators are fine,
/// a non-zero fraction is not.
pub fn parse_count(raw: &str) -> Result<i64, String> {
    let n = split_number(raw)?;
    if n.frac_digits.chars().any(|c| c != '0') {
        return Err(format!("'{}' is not a whole number", raw.trim()));
    }
    let value = digits_to_i64(&n.int_digits, raw)?;
    Ok(if n.negative { -value } else { value })
}

pub fn parse_non_negative_count(raw: &str, what: &str) -> Result<i64, String> {
    let value = parse_count(raw).map_err(|e| format!("{}: {}", what, e))?;
    if value < 0 {
        return Err(format!("{} cannot be negative", what));
    }
    Ok(value)
}

/// Percentages such as `10`, `10.5`, `10,5` or `12%`.
pub fn parse_percent(raw: &str) -> Result<f64, String> {
    let cleaned = raw.trim().trim_end_matches('%').trim().replace(',', ".");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{}' is not a percentage", raw.trim()))
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M",
];
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Timestamps without an offset are taken as UTC; bare dates as midnight.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }
    }
    Err(format!("'{}' is not a recognised date", s))
}
