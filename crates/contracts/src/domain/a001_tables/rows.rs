use super::aggregate::{null_as_empty, TableKey, ROUTE_COLUMNS};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reserved field carrying the client-side row position
pub const ROW_INDEX_FIELD: &str = "__row_index";

/// One row of a table: header -> scalar value, plus its position in the
/// last full-table response.
///
/// The position is not a server identifier. It is reassigned on every fetch
/// and only addresses the row until the next reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DataRow {
    #[serde(rename = "__row_index", default, deserialize_with = "discard_index")]
    pub row_index: usize,
    #[serde(flatten)]
    pub cells: Map<String, Value>,
}

impl DataRow {
    pub fn get(&self, header: &str) -> Option<&Value> {
        self.cells.get(header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TableMeta {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub total_columns: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableDataResponse {
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assembly: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<DataRow>,
    #[serde(default)]
    pub meta: TableMeta,
}

impl TableDataResponse {
    /// Numbers rows by their position in this response.
    pub fn with_row_indices(mut self) -> Self {
        assign_row_indices(&mut self.rows);
        self
    }

    pub fn key(&self) -> TableKey {
        TableKey::new(&self.region, &self.assembly)
    }

    /// Headers the add-row wizard walks through: route columns are implied.
    pub fn wizard_headers(&self) -> Vec<String> {
        wizard_headers(&self.headers)
    }
}

/// Sets each row's index to its 0-based position, whatever it held before.
pub fn assign_row_indices(rows: &mut [DataRow]) {
    for (index, row) in rows.iter_mut().enumerate() {
        row.row_index = index;
    }
}

pub fn wizard_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| !ROUTE_COLUMNS.contains(&h.as_str()))
        .cloned()
        .collect()
}

// Whatever the service sent under the reserved field is overwritten after
// decoding, so any JSON value is accepted here.
fn discard_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "region": "Borgou",
            "assembly": "Parakou",
            "headers": ["Region", "Assembly", "Nom", "Age"],
            "rows": [
                { "__row_index": 7, "Nom": "Adjovi", "Age": 31 },
                { "Nom": "Bio", "Age": null },
                { "__row_index": "x", "Nom": "Chabi", "Age": "" }
            ],
            "meta": { "total_rows": 3, "total_columns": 4 }
        })
    }

    #[test]
    fn test_rows_are_numbered_by_position() {
        let data: TableDataResponse = serde_json::from_value(sample_payload()).unwrap();
        let data = data.with_row_indices();

        let indices: Vec<usize> = data.rows.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(data.rows[0].get(ROW_INDEX_FIELD).is_none());
        assert_eq!(data.rows[0].get("Age"), Some(&json!(31)));
    }

    #[test]
    fn test_numbering_is_stable_across_fetches() {
        let first: TableDataResponse = serde_json::from_value(sample_payload()).unwrap();
        let second: TableDataResponse = serde_json::from_value(sample_payload()).unwrap();

        assert_eq!(first.with_row_indices(), second.with_row_indices());
    }

    #[test]
    fn test_wizard_headers_skip_route_columns() {
        let data: TableDataResponse = serde_json::from_value(sample_payload()).unwrap();
        assert_eq!(data.wizard_headers(), vec!["Nom".to_string(), "Age".to_string()]);
    }

    #[test]
    fn test_serialized_row_carries_index_field() {
        let mut cells = Map::new();
        cells.insert("Nom".into(), json!("Bio"));
        let row = DataRow { row_index: 4, cells };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value, json!({ "__row_index": 4, "Nom": "Bio" }));
    }
}
