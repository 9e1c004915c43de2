//! Tables of the Excel database: addressing, rows, and the add-row wizard.
//!
//! - aggregate.rs: Table, TableKey and request/response DTOs
//! - rows.rs: DataRow, table data responses and row numbering
//! - format.rs: cell display and edit snapshots
//! - wizard.rs: the add-row wizard state machine
//! - snapshot.rs: loaded table state guarded by fetch generations

pub mod aggregate;
pub mod format;
pub mod rows;
pub mod snapshot;
pub mod wizard;

pub use aggregate::{Table, TableKey, TableOperation};
pub use rows::{DataRow, TableDataResponse, TableMeta};
pub use snapshot::{is_current_load, RowHandle, StaleRowError, TableSnapshot};
pub use wizard::{AddRowWizard, WizardStep};
