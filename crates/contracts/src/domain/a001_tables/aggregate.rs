use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Columns implied by the route; the add-row wizard never asks for them.
pub const ROUTE_COLUMNS: [&str; 2] = ["Region", "Assembly"];

/// A table of the database, identified by (region, assembly)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Table {
    pub region: String,
    /// Empty for legacy tables imported from unstructured sheets
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assembly: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sheet_name: String,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub total_columns: u64,
}

impl Table {
    pub fn is_legacy(&self) -> bool {
        is_blank(&self.assembly)
    }

    /// Key used to address this table in routes and API paths
    pub fn key(&self) -> TableKey {
        TableKey::new(&self.region, &self.assembly).addressable()
    }

    /// Assembly label for cards; legacy tables have none to show
    pub fn assembly_label(&self) -> &str {
        if self.is_legacy() {
            "(Feuille legacy)"
        } else {
            &self.assembly
        }
    }
}

/// (region, assembly) pair identifying a table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TableKey {
    pub region: String,
    pub assembly: String,
}

impl TableKey {
    pub fn new(region: impl Into<String>, assembly: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            assembly: assembly.into(),
        }
    }

    /// Assembly value used for addressing: the region stands in when empty.
    pub fn effective_assembly(&self) -> &str {
        if is_blank(&self.assembly) {
            &self.region
        } else {
            &self.assembly
        }
    }

    /// Same key with the legacy fallback applied.
    pub fn addressable(&self) -> Self {
        Self::new(self.region.clone(), self.effective_assembly())
    }

    /// Client route of the table detail page
    pub fn route_path(&self) -> String {
        format!(
            "/table/{}/{}",
            urlencoding::encode(&self.region),
            urlencoding::encode(self.effective_assembly())
        )
    }

    /// Service path of the table resource, without base URL
    pub fn api_path(&self) -> String {
        format!(
            "/tables/{}/{}",
            urlencoding::encode(&self.region),
            urlencoding::encode(&self.assembly)
        )
    }

    /// Builds a key from raw route params, percent-decoding each segment.
    /// A segment that does not decode is kept verbatim.
    pub fn from_route_params(region: &str, assembly: &str) -> Self {
        Self::new(decode_segment(region), decode_segment(assembly))
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.region, self.assembly)
    }
}

/// Assembly values that mark a legacy table
fn is_blank(assembly: &str) -> bool {
    assembly.trim().is_empty()
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Operations that may be in flight at the same time, keyed by table where
/// the operation targets one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableOperation {
    CreateTable,
    FixLegacy,
    DeleteTable(TableKey),
    AddRow(TableKey),
    UpdateRow(TableKey),
    ImportExcel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableListResponse {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTableRequest {
    pub region: String,
    pub assembly: String,
}

/// Body of add/update row calls: `{ "row": { header: value } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPayload {
    pub row: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FixLegacyResult {
    #[serde(default)]
    pub sheets_renamed: u64,
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_uses_region_for_empty_assembly() {
        let legacy = TableKey::new("Borgou", "");
        assert_eq!(legacy.route_path(), "/table/Borgou/Borgou");

        let structured = TableKey::new("Borgou", "Parakou");
        assert_eq!(structured.route_path(), "/table/Borgou/Parakou");
    }

    #[test]
    fn test_route_segments_are_encoded() {
        let key = TableKey::new("Atacora Nord", "Natitingou/2");
        assert_eq!(key.route_path(), "/table/Atacora%20Nord/Natitingou%2F2");
        assert_eq!(
            key.api_path(),
            "/tables/Atacora%20Nord/Natitingou%2F2"
        );
    }

    #[test]
    fn test_route_params_decode() {
        let key = TableKey::from_route_params("Atacora%20Nord", "Natitingou%2F2");
        assert_eq!(key, TableKey::new("Atacora Nord", "Natitingou/2"));

        // Invalid UTF-8 escape stays verbatim
        let key = TableKey::from_route_params("%FF", "Parakou");
        assert_eq!(key.region, "%FF");
    }

    #[test]
    fn test_legacy_table_key_and_label() {
        let table: Table = serde_json::from_value(json!({
            "region": "Borgou",
            "assembly": null,
            "sheet_name": "Sheet1",
            "total_rows": 4,
            "total_columns": 3
        }))
        .unwrap();

        assert!(table.is_legacy());
        assert_eq!(table.assembly_label(), "(Feuille legacy)");
        assert_eq!(table.key(), TableKey::new("Borgou", "Borgou"));
    }

    #[test]
    fn test_whitespace_assembly_is_legacy_everywhere() {
        let table = Table {
            region: "Borgou".to_string(),
            assembly: "  ".to_string(),
            ..Default::default()
        };

        assert!(table.is_legacy());
        assert_eq!(table.assembly_label(), "(Feuille legacy)");
        assert_eq!(table.key(), TableKey::new("Borgou", "Borgou"));
        assert_eq!(table.key().route_path(), "/table/Borgou/Borgou");
    }

    #[test]
    fn test_list_response_tolerates_missing_fields() {
        let list: TableListResponse = serde_json::from_value(json!({
            "tables": [{ "region": "Alibori", "assembly": "Kandi" }]
        }))
        .unwrap();

        assert_eq!(list.tables.len(), 1);
        assert_eq!(list.tables[0].total_rows, 0);
        assert_eq!(list.total, None);
    }
}
