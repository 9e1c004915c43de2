//! Table detail page
//!
//! - view_model.rs: rows snapshot, dialogs state and commands
//! - view.rs: Leptos component

mod view;
mod view_model;

pub use view::TableDetails;
pub use view_model::{EditSession, TableDetailsViewModel, STALE_ROW_MESSAGE};
