//! Cell rendering and edit snapshots.

use super::rows::DataRow;
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Placeholder for empty cells
pub const EMPTY_CELL: &str = "—";

/// Text shown in a data table cell.
///
/// Null, missing and empty values render as a dash. Strings that start with
/// an ISO date render as `DD/MM/YYYY`.
pub fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_string(),
        Some(Value::String(s)) if s.is_empty() => EMPTY_CELL.to_string(),
        Some(Value::String(s)) => format_iso_date(s).unwrap_or_else(|| s.clone()),
        Some(other) => plain_text(other),
    }
}

/// Text of a value as typed into an input; null and missing become "".
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => plain_text(other),
    }
}

/// Values of `row` for every header, as strings.
///
/// The result holds exactly the given header set; unset values are "".
pub fn edit_snapshot(headers: &[String], row: &DataRow) -> Map<String, Value> {
    headers
        .iter()
        .map(|h| (h.clone(), Value::String(cell_text(row.get(h)))))
        .collect()
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_iso_date(s: &str) -> Option<String> {
    let prefix = s.get(..10)?;
    let bytes = prefix.as_bytes();
    let shaped = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_empty_values() {
        assert_eq!(format_cell(None), "—");
        assert_eq!(format_cell(Some(&Value::Null)), "—");
        assert_eq!(format_cell(Some(&json!(""))), "—");
    }

    #[test]
    fn test_format_dates() {
        assert_eq!(format_cell(Some(&json!("2024-03-15"))), "15/03/2024");
        assert_eq!(
            format_cell(Some(&json!("2024-12-31T23:59:59Z"))),
            "31/12/2024"
        );
        // Date-shaped but not a calendar date
        assert_eq!(format_cell(Some(&json!("2024-13-45"))), "2024-13-45");
    }

    #[test]
    fn test_format_scalars() {
        assert_eq!(format_cell(Some(&json!(0))), "0");
        assert_eq!(format_cell(Some(&json!(12.5))), "12.5");
        assert_eq!(format_cell(Some(&json!(true))), "true");
        assert_eq!(format_cell(Some(&json!("Parakou"))), "Parakou");
    }

    #[test]
    fn test_edit_snapshot_defaults_to_empty_string() {
        let row: DataRow = serde_json::from_value(json!({
            "Nom": "Bio",
            "Age": null,
            "Score": 0
        }))
        .unwrap();
        let headers = vec![
            "Nom".to_string(),
            "Age".to_string(),
            "Score".to_string(),
            "Ville".to_string(),
        ];

        let snapshot = edit_snapshot(&headers, &row);

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot["Nom"], json!("Bio"));
        assert_eq!(snapshot["Age"], json!(""));
        assert_eq!(snapshot["Score"], json!("0"));
        assert_eq!(snapshot["Ville"], json!(""));
    }
}
