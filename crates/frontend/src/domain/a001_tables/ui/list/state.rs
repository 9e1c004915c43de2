use contracts::domain::a001_tables::Table;
use leptos::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct TableListState {
    pub tables: Vec<Table>,
    pub is_loaded: bool,
    pub loading: bool,
}

impl TableListState {
    /// "3 tableaux", "1 tableau"
    pub fn count_label(&self) -> String {
        let n = self.tables.len();
        format!("{} tableau{}", n, if n == 1 { "" } else { "x" })
    }
}

pub fn create_state() -> RwSignal<TableListState> {
    RwSignal::new(TableListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label() {
        let mut state = TableListState::default();
        assert_eq!(state.count_label(), "0 tableaux");

        state.tables.push(Table::default());
        assert_eq!(state.count_label(), "1 tableau");
    }
}
