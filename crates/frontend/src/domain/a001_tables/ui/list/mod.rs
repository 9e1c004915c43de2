pub mod state;

use self::state::create_state;
use super::create_dialog::CreateTableDialog;
use crate::domain::a001_tables::api;
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;
use crate::shared::operations::Operations;
use crate::shared::submit::on_submit;
use crate::usecases::u501_import_excel::view::ImportDialog;
use contracts::domain::a001_tables::{Table, TableOperation};
use contracts::shared::api_error::ApiErrorKind;
use contracts::shared::in_flight::ReloadQueue;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn TableList() -> impl IntoView {
    let notifier = use_notifier();
    let navigate = StoredValue::new_local(use_navigate());

    let state = create_state();
    let ops = Operations::new();
    let (create_open, set_create_open) = signal(false);
    let (import_open, set_import_open) = signal(false);

    let reload = StoredValue::new(ReloadQueue::default());

    let load_tables = move || {
        if !reload.try_update_value(|q| q.request()).unwrap_or(false) {
            log::debug!("Table list reload queued behind the running one");
            return;
        }
        state.update(|s| s.loading = true);
        spawn_local(async move {
            loop {
                match api::list_tables().await {
                    Ok(list) => {
                        let _ = state.try_update(|s| {
                            s.tables = list.tables;
                            s.is_loaded = true;
                        });
                    }
                    Err(e) => {
                        log::error!("Failed to load tables: {}", e);
                        notifier.error("Erreur lors du chargement des tableaux");
                    }
                }
                if !reload.try_update_value(|q| q.settle()).unwrap_or(false) {
                    break;
                }
            }
            let _ = state.try_update(|s| s.loading = false);
        });
    };

    // Load on mount
    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_tables();
        }
    });

    let create_table = on_submit(move |(region, assembly): (String, String)| async move {
        if !ops.begin(TableOperation::CreateTable) {
            return Err("Création déjà en cours".to_string());
        }
        let result = api::create_table(&region, &assembly).await;
        ops.finish(&TableOperation::CreateTable);

        match result {
            Ok(_) => {
                notifier.success(format!("Tableau \"{} - {}\" créé", region, assembly));
                load_tables();
                Ok(())
            }
            Err(e) => {
                let message = match e.kind() {
                    ApiErrorKind::Conflict => "Ce tableau existe déjà",
                    _ => "Erreur lors de la création",
                };
                notifier.error(message);
                Err(message.to_string())
            }
        }
    });

    let delete_table = move |table: Table| {
        let key = table.key();
        if !confirm(&format!("Supprimer le tableau \"{}\" ?", key.title())) {
            return;
        }
        let op = TableOperation::DeleteTable(key.clone());
        if !ops.begin(op.clone()) {
            return;
        }
        spawn_local(async move {
            match api::delete_table(&key).await {
                Ok(_) => {
                    notifier.success("Tableau supprimé");
                    load_tables();
                }
                Err(e) => {
                    log::error!("Failed to delete {}: {}", key.title(), e);
                    notifier.error("Erreur lors de la suppression");
                }
            }
            ops.finish(&op);
        });
    };

    let fix_legacy = move |_: ev::MouseEvent| {
        if !confirm("Corriger automatiquement les tableaux legacy (Sheet1, etc.) ?") {
            return;
        }
        if !ops.begin(TableOperation::FixLegacy) {
            return;
        }
        spawn_local(async move {
            match api::fix_legacy_tables().await {
                Ok(result) if result.sheets_renamed > 0 => {
                    notifier.success(format!("{} tableau(x) corrigé(s) !", result.sheets_renamed));
                    load_tables();
                }
                Ok(_) => {
                    notifier.info("Aucun tableau à corriger");
                    load_tables();
                }
                Err(e) => {
                    log::error!("Failed to fix legacy tables: {}", e);
                    notifier.error("Erreur lors de la correction");
                }
            }
            ops.finish(&TableOperation::FixLegacy);
        });
    };

    let open_table = move |table: Table| {
        let path = table.key().route_path();
        log::debug!("Navigating to {}", path);
        navigate.with_value(|nav| nav(&path, Default::default()));
    };

    let on_imported = Callback::new(move |_: ()| load_tables());
    let create_table = StoredValue::new_local(create_table);

    view! {
        <div class="table-list">
            <header class="page-header">
                <div class="page-header__title">
                    {icon("database")}
                    <div>
                        <h1>"Excel Database Manager"</h1>
                        <p class="page-header__subtitle">{move || state.with(|s| s.count_label())}</p>
                    </div>
                </div>
                <Space>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| set_import_open.set(true)>
                        {icon("upload")}
                        " Importer"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| api::download_database()>
                        {icon("download")}
                        " Télécharger"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=fix_legacy
                        disabled=Signal::derive(move || ops.is_active(&TableOperation::FixLegacy))
                    >
                        {icon("wrench")}
                        " Corriger legacy"
                    </Button>
                </Space>
            </header>

            <main class="page-content">
                {move || {
                    let (loading, tables) = state.with(|s| (s.loading && !s.is_loaded, s.tables.clone()));
                    if loading {
                        view! {
                            <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                                <Spinner />
                                "Chargement..."
                            </Flex>
                        }.into_any()
                    } else if tables.is_empty() {
                        view! {
                            <div class="empty-state">
                                <h3>"Aucun tableau"</h3>
                                <p>"Créez votre premier tableau pour commencer"</p>
                                <Button appearance=ButtonAppearance::Primary on_click=move |_| set_create_open.set(true)>
                                    {icon("plus")}
                                    " Créer un tableau"
                                </Button>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div class="table-grid">
                                {tables.into_iter().map(|table| {
                                    let for_open = table.clone();
                                    let for_delete = table.clone();
                                    let deleting = TableOperation::DeleteTable(table.key());
                                    view! {
                                        <div class="table-card" on:click=move |_| open_table(for_open.clone())>
                                            <div class="table-card__head">
                                                <div>
                                                    <h3 class="table-card__region">{table.region.clone()}</h3>
                                                    <p class="table-card__assembly">{table.assembly_label().to_string()}</p>
                                                </div>
                                                <button
                                                    class="button button--icon table-card__delete"
                                                    disabled=move || ops.is_active(&deleting)
                                                    on:click=move |e: ev::MouseEvent| {
                                                        e.stop_propagation();
                                                        delete_table(for_delete.clone());
                                                    }
                                                >
                                                    {icon("trash")}
                                                </button>
                                            </div>
                                            <div class="table-card__foot">
                                                <span>
                                                    {format!("{} ligne{}", table.total_rows, if table.total_rows == 1 { "" } else { "s" })}
                                                </span>
                                                <span class="table-card__open">"Ouvrir →"</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                                <button class="table-card table-card--new" on:click=move |_| set_create_open.set(true)>
                                    {icon("plus")}
                                    <span>"Nouveau tableau"</span>
                                </button>
                            </div>
                        }.into_any()
                    }
                }}
            </main>

            <Show when=move || create_open.get()>
                <CreateTableDialog
                    on_create=create_table.get_value()
                    on_close=Callback::new(move |_| set_create_open.set(false))
                />
            </Show>

            <Show when=move || import_open.get()>
                <ImportDialog
                    on_imported=on_imported
                    on_close=Callback::new(move |_| set_import_open.set(false))
                />
            </Show>
        </div>
    }
}
