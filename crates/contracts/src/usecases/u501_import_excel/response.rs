use serde::{Deserialize, Serialize};

/// A sheet the import could not process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SheetError {
    #[serde(default)]
    pub sheet: String,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Summary of one `POST /import-excel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImportResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub tables_added: u64,
    #[serde(default)]
    pub tables_merged: u64,
    #[serde(default)]
    pub rows_added: u64,
    #[serde(default)]
    pub rows_skipped: u64,
    #[serde(default)]
    pub errors: Vec<SheetError>,
    #[serde(default)]
    pub message: String,
}

impl ImportResult {
    /// A clean import closes its dialog on its own.
    pub fn auto_closes(&self) -> bool {
        self.success && self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_import_auto_closes() {
        let result: ImportResult = serde_json::from_value(json!({
            "success": true,
            "tables_added": 1,
            "tables_merged": 2,
            "rows_added": 40,
            "rows_skipped": 3,
            "errors": [],
            "message": "Import terminé"
        }))
        .unwrap();

        assert!(result.auto_closes());
    }

    #[test]
    fn test_sheet_errors_keep_dialog_open() {
        let result: ImportResult = serde_json::from_value(json!({
            "success": true,
            "errors": [{ "sheet": "Feuil2", "error": "schema_mismatch", "message": "Colonnes inattendues" }]
        }))
        .unwrap();

        assert!(!result.auto_closes());
        assert_eq!(result.errors[0].sheet, "Feuil2");
    }

    #[test]
    fn test_failed_import_never_auto_closes() {
        let result = ImportResult {
            success: false,
            ..Default::default()
        };
        assert!(!result.auto_closes());
    }
}
