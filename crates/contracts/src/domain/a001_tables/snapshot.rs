use super::aggregate::TableKey;
use super::format::edit_snapshot;
use super::rows::{DataRow, TableDataResponse};
use serde_json::{Map, Value};
use thiserror::Error;

/// Row address valid only for the fetch that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHandle {
    pub generation: u64,
    pub row_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row #{row_index} was read at fetch {opened_at}, table is now at fetch {current}")]
pub struct StaleRowError {
    pub row_index: usize,
    pub opened_at: u64,
    pub current: u64,
}

/// Table data currently shown by the detail view.
///
/// Every install of a fresh response bumps the generation, which retires all
/// row handles taken from earlier responses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSnapshot {
    data: Option<TableDataResponse>,
    generation: u64,
}

impl TableSnapshot {
    pub fn data(&self) -> Option<&TableDataResponse> {
        self.data.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the whole table; rows are renumbered by position.
    pub fn install(&mut self, data: TableDataResponse) {
        self.data = Some(data.with_row_indices());
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.data = None;
        self.generation += 1;
    }

    pub fn handle(&self, row: &DataRow) -> RowHandle {
        RowHandle {
            generation: self.generation,
            row_index: row.row_index,
        }
    }

    /// Edit dialog values for `row`: every header, unset values as "".
    pub fn edit_values(&self, row: &DataRow) -> Map<String, Value> {
        let headers = self.data.as_ref().map(|d| d.headers.as_slice()).unwrap_or(&[]);
        edit_snapshot(headers, row)
    }

    /// Index to send with an update, if the handle is still current.
    pub fn resolve(&self, handle: RowHandle) -> Result<usize, StaleRowError> {
        let in_range = self
            .data
            .as_ref()
            .map(|d| handle.row_index < d.rows.len())
            .unwrap_or(false);

        if handle.generation != self.generation || !in_range {
            return Err(StaleRowError {
                row_index: handle.row_index,
                opened_at: handle.generation,
                current: self.generation,
            });
        }
        Ok(handle.row_index)
    }
}

/// Whether a load of `fetched` that just settled still concerns the table on
/// screen. `current` is `None` once the view is gone.
pub fn is_current_load(current: Option<&TableKey>, fetched: &TableKey) -> bool {
    current == Some(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(names: &[&str]) -> TableDataResponse {
        let rows: Vec<Value> = names.iter().map(|n| json!({ "Nom": n })).collect();
        serde_json::from_value(json!({
            "region": "Borgou",
            "assembly": "Parakou",
            "headers": ["Nom", "Age"],
            "rows": rows,
            "meta": { "total_rows": names.len(), "total_columns": 2 }
        }))
        .unwrap()
    }

    #[test]
    fn test_handle_resolves_within_same_fetch() {
        let mut snapshot = TableSnapshot::default();
        snapshot.install(response(&["Adjovi", "Bio"]));

        let row = snapshot.data().unwrap().rows[1].clone();
        let handle = snapshot.handle(&row);

        assert_eq!(snapshot.resolve(handle), Ok(1));
    }

    #[test]
    fn test_reload_retires_old_handles() {
        let mut snapshot = TableSnapshot::default();
        snapshot.install(response(&["Adjovi", "Bio"]));
        let row = snapshot.data().unwrap().rows[0].clone();
        let handle = snapshot.handle(&row);

        snapshot.install(response(&["Chabi", "Adjovi", "Bio"]));

        let err = snapshot.resolve(handle).unwrap_err();
        assert_eq!(err.opened_at, 1);
        assert_eq!(err.current, 2);
    }

    #[test]
    fn test_out_of_range_handle_is_stale() {
        let mut snapshot = TableSnapshot::default();
        snapshot.install(response(&["Adjovi"]));

        let handle = RowHandle {
            generation: snapshot.generation(),
            row_index: 3,
        };
        assert!(snapshot.resolve(handle).is_err());
    }

    #[test]
    fn test_load_settling_after_leaving_the_table_is_ignored() {
        let left = TableKey::new("Borgou", "Parakou");
        let shown = TableKey::new("Alibori", "Kandi");
        assert!(!is_current_load(Some(&shown), &left));
        assert!(!is_current_load(None, &left));
        assert!(is_current_load(Some(&left), &left));
    }

    #[test]
    fn test_edit_values_cover_all_headers() {
        let mut snapshot = TableSnapshot::default();
        snapshot.install(response(&["Adjovi"]));
        let row = snapshot.data().unwrap().rows[0].clone();

        let values = snapshot.edit_values(&row);
        assert_eq!(Value::Object(values), json!({ "Nom": "Adjovi", "Age": "" }));
    }
}
