//! Turns uploaded spreadsheets into uniform records.
//!
//! Sources arrive as a JSON array of objects or as CSV text exported from
//! whatever tool the café used, so column names vary (`No. HP`, `no_hp`,
//! `phone`...). Every header is reduced to lowercase alphanumerics and looked
//! up in the entity's [`ImportSchema`]; files without a recognisable header
//! are read positionally in the schema's column order. Values stay strings
//! here; typed parsing lives in [`values`] and in the per-entity use cases.

pub mod schemas;
pub mod values;

use std::collections::HashMap;

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Canonical normalized name, also the lookup key on [`RawRecord`].
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct ImportSchema {
    pub entity: &'static str,
    /// In positional order for headerless files.
    pub columns: &'static [Column],
}

impl ImportSchema {
    pub fn resolve(&self, header: &str) -> Option<&'static str> {
        let key = normalize_header(header);
        if key.is_empty() {
            return None;
        }
        self.columns
            .iter()
            .find(|c| c.name == key || c.aliases.contains(&key.as_str()))
            .map(|c| c.name)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImportError {
    #[error("import contains no rows")]
    Empty,
    #[error("malformed CSV near line {line}: {message}")]
    Malformed { line: u64, message: String },
    #[error("JSON import must be an array of objects")]
    UnsupportedShape,
}

/// One source row with its values keyed by canonical column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub row: usize,
    fields: HashMap<&'static str, String>,
}

impl RawRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            fields: HashMap::new(),
        }
    }

    pub fn with(mut self, column: &'static str, value: &str) -> Self {
        self.insert(column, value);
        self
    }

    fn insert(&mut self, column: &'static str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.fields.entry(column).or_insert_with(|| value.to_string());
        }
    }

    /// Trimmed, non-empty value of a column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn require(&self, column: &str) -> Result<&str, String> {
        self.get(column)
            .ok_or_else(|| format!("missing {}", column))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn detect_delimiter(text: &str) -> u8 {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    [b',', b';', b'\t']
        .into_iter()
        .map(|d| (d, first.bytes().filter(|b| *b == d).count()))
        .filter(|(_, n)| *n > 0)
        .max_by_key(|(_, n)| *n)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

/// 1-based line of the record starting at `byte`. The reader reports the
/// offset before any blank lines it skipped, so those are stepped over here.
fn source_line(text: &str, byte: u64) -> usize {
    let bytes = text.as_bytes();
    let start = usize::try_from(byte).unwrap_or(usize::MAX).min(bytes.len());
    let skipped = bytes[start..]
        .iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .count();
    1 + bytes[..start + skipped].iter().filter(|b| **b == b'\n').count()
}

pub fn records_from_csv(schema: &ImportSchema, text: &str) -> Result<Vec<RawRecord>, ImportError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(detect_delimiter(text))
        .from_reader(text.as_bytes());

    let mut mapping: Option<Vec<Option<&'static str>>> = None;
    let mut out = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Malformed {
            line: e
                .position()
                .map(|p| source_line(text, p.byte()) as u64)
                .unwrap_or(0),
            message: e.to_string(),
        })?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map(|p| source_line(text, p.byte()))
            .unwrap_or(0);

        if mapping.is_none() {
            let header: Vec<Option<&'static str>> =
                record.iter().map(|cell| schema.resolve(cell)).collect();
            if header.iter().any(Option::is_some) {
                mapping = Some(header);
                continue;
            }
            tracing::debug!(entity = schema.entity, "csv_import_headerless");
            mapping = Some(schema.columns.iter().map(|c| Some(c.name)).collect());
        }
        let Some(columns) = mapping.as_ref() else {
            continue;
        };

        let mut raw = RawRecord::new(line);
        for (idx, cell) in record.iter().enumerate() {
            if let Some(Some(column)) = columns.get(idx) {
                raw.insert(column, cell);
            }
        }
        out.push(raw);
    }

    if out.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(out)
}

pub fn records_from_json(
    schema: &ImportSchema,
    value: &JsonValue,
) -> Result<Vec<RawRecord>, ImportError> {
    let items = value.as_array().ok_or(ImportError::UnsupportedShape)?;
    if items.is_empty() {
        return Err(ImportError::Empty);
    }
    let records = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let mut raw = RawRecord::new(idx + 1);
            if let Some(obj) = item.as_object() {
                for (key, v) in obj {
                    let Some(column) = schema.resolve(key) else {
                        continue;
                    };
                    match v {
                        JsonValue::String(s) => raw.insert(column, s),
                        JsonValue::Number(n) => raw.insert(column, &n.to_string()),
                        JsonValue::Bool(b) => raw.insert(column, &b.to_string()),
                        _ => {}
                    }
                }
            }
            raw
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::schemas::{CUSTOMERS, MEMBERSHIPS, TRANSACTIONS};
    use super::*;
    use serde_json::json;

    #[test]
    fn header_normalization_ignores_case_and_punctuation() {
        assert_eq!(normalize_header("\u{feff}No. HP"), "nohp");
        assert_eq!(normalize_header("total_poin"), "totalpoin");
        assert_eq!(CUSTOMERS.resolve("No. Telepon"), Some("phone"));
        assert_eq!(CUSTOMERS.resolve("Nama Pelanggan"), Some("name"));
        assert_eq!(CUSTOMERS.resolve("favourite drink"), None);
    }

    #[test]
    fn csv_with_aliased_headers_and_extra_columns() {
        let csv = "Nama,No HP,E-mail,Poin,Favourite\nBudi,0812345678,budi@kopi.id,120,Latte\n";
        let rows = records_from_csv(&CUSTOMERS, csv).unwrap();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.row, 2);
        assert_eq!(r.get("name"), Some("Budi"));
        assert_eq!(r.get("phone"), Some("0812345678"));
        assert_eq!(r.get("email"), Some("budi@kopi.id"));
        assert_eq!(r.get("points"), Some("120"));
    }

    #[test]
    fn headerless_csv_is_positional() {
        let csv = "Siti, siti@kopi.id , 0813000111, 40\n\nAndi,,0813000222,\n";
        let rows = records_from_csv(&CUSTOMERS, csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("email"), Some("siti@kopi.id"));
        assert_eq!(rows[1].row, 3);
        assert_eq!(rows[1].get("email"), None);
        assert_eq!(rows[1].get("points"), None);
    }

    #[test]
    fn row_numbers_count_blank_lines_and_crlf() {
        let csv = "name,email,phone,points\r\n\r\nSiti,,0813000111,40\r\n\n\n\"Andi\nJr\",,0813000222,\r\nBayu,,0813000333,1\r\n";
        let rows = records_from_csv(&CUSTOMERS, csv).unwrap();
        let lines: Vec<usize> = rows.iter().map(|r| r.row).collect();
        assert_eq!(lines, vec![3, 6, 8]);
    }

    #[test]
    fn semicolon_delimiter_is_detected() {
        let csv = "Tier;Min Points;Diskon\nGold;500;10,5\n";
        let rows = records_from_csv(&MEMBERSHIPS, csv).unwrap();
        assert_eq!(rows[0].get("tier"), Some("Gold"));
        assert_eq!(rows[0].get("requiredpoints"), Some("500"));
        assert_eq!(rows[0].get("discount"), Some("10,5"));
    }

    #[test]
    fn quoted_cells_keep_embedded_delimiters() {
        let csv = "date,product,qty,total\n2024-05-01,\"Kopi, Gula Aren\",2,\"36,000\"\n";
        let rows = records_from_csv(&TRANSACTIONS, csv).unwrap();
        assert_eq!(rows[0].get("product"), Some("Kopi, Gula Aren"));
        assert_eq!(rows[0].get("total"), Some("36,000"));
    }

    #[test]
    fn header_only_csv_is_empty() {
        assert_eq!(
            records_from_csv(&CUSTOMERS, "name,email,phone,points\n"),
            Err(ImportError::Empty)
        );
    }

    #[test]
    fn json_keys_share_the_alias_table() {
        let body = json!([
            {"nama_pelanggan": "Rina", "no_telepon_pelanggan": "0815", "total_poin": 7},
            "not an object"
        ]);
        let rows = records_from_json(&CUSTOMERS, &body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Rina"));
        assert_eq!(rows[0].get("points"), Some("7"));
        assert!(rows[1].is_empty());
    }

    #[test]
    fn json_must_be_a_non_empty_array() {
        assert_eq!(
            records_from_json(&CUSTOMERS, &json!({"name": "x"})),
            Err(ImportError::UnsupportedShape)
        );
        assert_eq!(records_from_json(&CUSTOMERS, &json!([])), Err(ImportError::Empty));
    }
}
