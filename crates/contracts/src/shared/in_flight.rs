use std::collections::HashSet;
use std::hash::Hash;

/// Set of operations currently awaiting the service.
///
/// A second `try_begin` for a key already in flight is refused; the key is
/// released by `finish` once the call settles, success or failure.
#[derive(Debug, Clone)]
pub struct InFlight<K: Eq + Hash> {
    active: HashSet<K>,
}

impl<K: Eq + Hash> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            active: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> InFlight<K> {
    pub fn try_begin(&mut self, key: K) -> bool {
        self.active.insert(key)
    }

    pub fn finish(&mut self, key: &K) {
        self.active.remove(key);
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active.contains(key)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}

/// Reload bookkeeping for one view.
///
/// Loads never run concurrently and are never dropped: a request made while a
/// fetch is running queues exactly one follow-up fetch, started once the
/// running one settles. Requests made meanwhile share that follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReloadQueue {
    running: bool,
    queued: bool,
}

impl ReloadQueue {
    /// True if the caller should start a fetch now.
    pub fn request(&mut self) -> bool {
        if self.running {
            self.queued = true;
            false
        } else {
            self.running = true;
            true
        }
    }

    /// The running fetch settled; true if a queued follow-up must start now.
    pub fn settle(&mut self) -> bool {
        if self.queued {
            self.queued = false;
            true
        } else {
            self.running = false;
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_tables::{TableKey, TableOperation};

    #[test]
    fn test_second_trigger_is_rejected_until_finished() {
        let mut in_flight = InFlight::default();
        let op = TableOperation::AddRow(TableKey::new("Borgou", "Parakou"));

        assert!(in_flight.try_begin(op.clone()));
        assert!(!in_flight.try_begin(op.clone()));
        assert!(in_flight.is_active(&op));

        in_flight.finish(&op);
        assert!(in_flight.is_idle());
        assert!(in_flight.try_begin(op));
    }

    #[test]
    fn test_keys_for_other_tables_are_independent() {
        let mut in_flight = InFlight::default();

        assert!(in_flight.try_begin(TableOperation::DeleteTable(TableKey::new("Borgou", "Parakou"))));
        assert!(in_flight.try_begin(TableOperation::DeleteTable(TableKey::new("Borgou", "Nikki"))));
        assert!(in_flight.try_begin(TableOperation::CreateTable));
    }

    #[test]
    fn test_reload_requested_during_fetch_is_not_lost() {
        let mut reload = ReloadQueue::default();

        // Delete of A succeeded: first reload starts
        assert!(reload.request());
        // Delete of B succeeded while that reload is pending
        assert!(!reload.request());

        // First reload settles: the follow-up must run
        assert!(reload.settle());
        assert!(reload.is_running());

        // Follow-up settles with nothing queued
        assert!(!reload.settle());
        assert!(!reload.is_running());
    }

    #[test]
    fn test_requests_during_fetch_share_one_follow_up() {
        let mut reload = ReloadQueue::default();

        assert!(reload.request());
        assert!(!reload.request());
        assert!(!reload.request());

        assert!(reload.settle());
        assert!(!reload.settle());
        assert!(reload.request());
    }
}
