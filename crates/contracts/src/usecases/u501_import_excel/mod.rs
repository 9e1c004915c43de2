//! u501: upload an Excel workbook and merge its sheets into tables.

pub mod dialog;
pub mod response;

pub use dialog::{ImportDialogState, AUTO_CLOSE_DELAY_MS};
pub use response::{ImportResult, SheetError};
