pub mod add_row_wizard;
pub mod create_dialog;
pub mod data_table;
pub mod details;
pub mod edit_dialog;
pub mod list;
