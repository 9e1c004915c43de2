use contracts::domain::a001_tables::TableOperation;
use contracts::shared::in_flight::InFlight;
use leptos::prelude::*;

/// Reactive in-flight tokens for one view
#[derive(Clone, Copy)]
pub struct Operations(RwSignal<InFlight<TableOperation>>);

impl Operations {
    pub fn new() -> Self {
        Self(RwSignal::new(InFlight::default()))
    }

    /// Takes the token for `op`; false if the same operation is pending.
    pub fn begin(&self, op: TableOperation) -> bool {
        let started = self.0.try_update(|f| f.try_begin(op.clone())).unwrap_or(false);
        if !started {
            log::debug!("{:?} already in flight, ignoring trigger", op);
        }
        started
    }

    pub fn finish(&self, op: &TableOperation) {
        let _ = self.0.try_update(|f| f.finish(op));
    }

    /// Tracked: use it to disable buttons.
    pub fn is_active(&self, op: &TableOperation) -> bool {
        self.0.with(|f| f.is_active(op))
    }
}

impl Default for Operations {
    fn default() -> Self {
        Self::new()
    }
}
