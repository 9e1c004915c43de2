use crate::domain::a001_tables::api;
use crate::shared::notify::Notifier;
use crate::shared::operations::Operations;
use crate::shared::submit::{on_submit, OnSubmit};
use contracts::domain::a001_tables::{
    is_current_load, DataRow, RowHandle, TableKey, TableOperation, TableSnapshot,
};
use contracts::shared::api_error::ApiErrorKind;
use contracts::shared::in_flight::ReloadQueue;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use serde_json::{Map, Value};
use std::rc::Rc;

pub const STALE_ROW_MESSAGE: &str = "La table a été rechargée, rouvrez la ligne";

type Navigate = Rc<dyn Fn(&str, NavigateOptions)>;

/// Row opened in the edit dialog
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub handle: RowHandle,
    pub values: Map<String, Value>,
}

/// ViewModel for one table's detail page
#[derive(Clone, Copy)]
pub struct TableDetailsViewModel {
    pub key: RwSignal<TableKey>,
    pub snapshot: RwSignal<TableSnapshot>,
    pub loading: RwSignal<bool>,
    pub add_open: RwSignal<bool>,
    pub edit: RwSignal<Option<EditSession>>,
    pub ops: Operations,
    reload: StoredValue<ReloadQueue>,
    notifier: Notifier,
    navigate: StoredValue<Navigate, LocalStorage>,
}

impl TableDetailsViewModel {
    pub fn new(key: TableKey, notifier: Notifier, navigate: Navigate) -> Self {
        Self {
            key: RwSignal::new(key),
            snapshot: RwSignal::new(TableSnapshot::default()),
            loading: RwSignal::new(true),
            add_open: RwSignal::new(false),
            edit: RwSignal::new(None),
            ops: Operations::new(),
            reload: StoredValue::new(ReloadQueue::default()),
            notifier,
            navigate: StoredValue::new_local(navigate),
        }
    }

    pub fn go_home(&self) {
        self.navigate.with_value(|nav| nav("/", Default::default()));
    }

    /// Switches to another table, dropping rows and dialogs of the previous one.
    pub fn set_key(&self, key: TableKey) {
        if self.key.get_untracked() == key {
            return;
        }
        self.key.set(key);
        self.snapshot.update(|s| s.clear());
        self.add_open.set(false);
        self.edit.set(None);
        self.load();
    }

    pub fn row_count(&self) -> usize {
        self.snapshot
            .with(|s| s.data().map(|d| d.rows.len()).unwrap_or(0))
    }

    /// Fetches rows of the current table; on failure the user is sent back
    /// to the table list. A load requested while one is running is queued
    /// and fetches whatever table is current when it starts.
    pub fn load(&self) {
        let this = *self;
        if !this.reload.try_update_value(|q| q.request()).unwrap_or(false) {
            log::debug!("Table reload queued behind the running one");
            return;
        }
        this.loading.set(true);

        spawn_local(async move {
            loop {
                let Some(key) = this.key.try_get_untracked() else {
                    return;
                };
                let result = api::get_table_data(&key).await;

                // Responses for a table the view has left are dropped
                if this.is_current(&key) {
                    match result {
                        Ok(data) => {
                            let _ = this.snapshot.try_update(|s| s.install(data));
                        }
                        Err(e) => {
                            log::error!("Failed to load {}: {}", key.title(), e);
                            this.notifier.error("Erreur lors du chargement du tableau");
                            this.go_home();
                        }
                    }
                } else {
                    log::debug!("Discarding response for {}", key.title());
                }

                if !this.reload.try_update_value(|q| q.settle()).unwrap_or(false) {
                    break;
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    fn is_current(&self, key: &TableKey) -> bool {
        is_current_load(self.key.try_get_untracked().as_ref(), key)
    }

    pub fn open_edit(&self, row: DataRow) {
        let session = self.snapshot.with_untracked(|s| EditSession {
            handle: s.handle(&row),
            values: s.edit_values(&row),
        });
        self.edit.set(Some(session));
    }

    pub fn close_edit(&self) {
        self.edit.set(None);
    }

    /// Completion callback of the add-row wizard.
    pub fn add_row_handler(&self) -> OnSubmit<Map<String, Value>> {
        let this = *self;
        on_submit(move |row: Map<String, Value>| async move {
            let key = this.key.get_untracked();
            let op = TableOperation::AddRow(key.clone());
            if !this.ops.begin(op.clone()) {
                return Err("Ajout déjà en cours".to_string());
            }
            let result = api::add_row(&key, row).await;
            this.ops.finish(&op);

            match result {
                Ok(_) => {
                    this.notifier.success("Ligne ajoutée");
                    this.load();
                    Ok(())
                }
                Err(e) => {
                    let message = match e.kind() {
                        ApiErrorKind::Duplicate => "Cette ligne existe déjà",
                        _ => "Erreur lors de l'ajout",
                    };
                    this.notifier.error(message);
                    Err(message.to_string())
                }
            }
        })
    }

    /// Save callback of the edit dialog for the currently opened row.
    pub fn save_edit_handler(&self) -> OnSubmit<Map<String, Value>> {
        let this = *self;
        on_submit(move |row: Map<String, Value>| async move {
            let handle = this
                .edit
                .with_untracked(|e| e.as_ref().map(|s| s.handle))
                .ok_or_else(|| STALE_ROW_MESSAGE.to_string())?;

            let row_index = this
                .snapshot
                .with_untracked(|s| s.resolve(handle))
                .map_err(|e| {
                    log::warn!("Rejected edit: {}", e);
                    STALE_ROW_MESSAGE.to_string()
                })?;

            let key = this.key.get_untracked();
            let op = TableOperation::UpdateRow(key.clone());
            if !this.ops.begin(op.clone()) {
                return Err("Modification déjà en cours".to_string());
            }
            let result = api::update_row(&key, row_index, row).await;
            this.ops.finish(&op);

            match result {
                Ok(_) => {
                    this.notifier.success("Ligne modifiée");
                    this.load();
                    Ok(())
                }
                Err(e) => {
                    log::error!("Failed to update row #{}: {}", row_index, e);
                    let message = "Erreur lors de la modification";
                    this.notifier.error(message);
                    Err(message.to_string())
                }
            }
        })
    }
}
