use super::api;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::operations::Operations;
use contracts::domain::a001_tables::TableOperation;
use contracts::usecases::u501_import_excel::{ImportDialogState, ImportResult, AUTO_CLOSE_DELAY_MS};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::File;

fn counter(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="import-result__counter">
            <span class="import-result__value">{value}</span>
            <span class="import-result__label">{label}</span>
        </div>
    }
}

fn result_view(result: ImportResult) -> impl IntoView {
    let has_errors = !result.errors.is_empty();
    let class = if result.success && !has_errors {
        "import-result import-result--success"
    } else {
        "import-result import-result--warning"
    };

    view! {
        <div class=class>
            <p class="import-result__message">{result.message.clone()}</p>
            <div class="import-result__counters">
                {counter("Tableaux créés", result.tables_added)}
                {counter("Tableaux fusionnés", result.tables_merged)}
                {counter("Lignes ajoutées", result.rows_added)}
                {counter("Lignes ignorées", result.rows_skipped)}
            </div>
            <Show when=move || has_errors>
                <p class="import-result__errors-title">"Feuilles en erreur :"</p>
            </Show>
            <ul class="import-result__errors">
                {result
                    .errors
                    .into_iter()
                    .map(|e| view! {
                        <li>
                            <strong>{format!("{}:", e.sheet)}</strong>
                            {format!(" {}", e.message)}
                        </li>
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

/// Workbook upload with a summary of what the service merged.
#[component]
pub fn ImportDialog(on_imported: Callback<()>, on_close: Callback<()>) -> impl IntoView {
    let file = RwSignal::new_local(None::<File>);
    let state = RwSignal::new(ImportDialogState::default());
    let ops = Operations::new();
    let uploading = move || ops.is_active(&TableOperation::ImportExcel);

    let handle_close = Callback::new(move |_: ()| {
        if ops.is_active(&TableOperation::ImportExcel) {
            return;
        }
        state.update(|s| s.close());
        file.set(None);
        on_close.run(());
    });

    let handle_file_select = move |ev: web_sys::Event| {
        let picked = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        if let Some(picked) = picked {
            log::debug!("Selected workbook {} ({} bytes)", picked.name(), picked.size());
            state.update(|s| s.select_file());
            file.set(Some(picked));
        }
    };

    let schedule_close = move |epoch: u64| {
        spawn_local(async move {
            TimeoutFuture::new(AUTO_CLOSE_DELAY_MS).await;
            let due = state
                .try_with_untracked(|s| s.should_auto_close(epoch))
                .unwrap_or(false);
            if due {
                handle_close.run(());
            }
        });
    };

    let upload = move || {
        let Some(selected) = file.get_untracked() else {
            return;
        };
        if !ops.begin(TableOperation::ImportExcel) {
            return;
        }
        state.update(|s| s.start());

        spawn_local(async move {
            let outcome = api::import_excel(&selected).await;
            ops.finish(&TableOperation::ImportExcel);

            match outcome {
                Ok(result) => {
                    log::info!(
                        "Import done: {} table(s) added, {} merged, {} row(s) added",
                        result.tables_added,
                        result.tables_merged,
                        result.rows_added
                    );
                    on_imported.run(());
                    if let Some(Some(epoch)) = state.try_update(|s| s.finish(result)) {
                        schedule_close(epoch);
                    }
                }
                Err(e) => {
                    let message = e
                        .service_message()
                        .unwrap_or_else(|| "Erreur lors de l'importation".to_string());
                    let _ = state.try_update(|s| s.fail(message));
                }
            }
        });
    };

    view! {
        <Modal
            title="Importer un fichier Excel".to_string()
            on_close=handle_close
            footer=move || view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| handle_close.run(())
                    disabled=Signal::derive(uploading)
                >
                    "Fermer"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| upload()
                    disabled=Signal::derive(move || uploading() || file.with(|f| f.is_none()))
                >
                    {icon("upload")}
                    {move || if uploading() { " Import en cours..." } else { " Importer" }}
                </Button>
            }
        >
            <p class="modal-description">
                "Les feuilles du classeur sont fusionnées avec les tableaux existants ou créées si besoin"
            </p>
            <div class="import-dialog__filebar">
                <label class="button button--primary" for="import-file-input">
                    {icon("file")}
                    " Choisir un fichier"
                </label>
                <input
                    id="import-file-input"
                    type="file"
                    accept=".xlsx,.xls"
                    class="hidden"
                    disabled=uploading
                    on:change=handle_file_select
                />
                {move || match file.get() {
                    Some(f) => view! {
                        <span class="import-dialog__fileinfo">
                            <strong>{f.name()}</strong>
                            {format!(" ({:.2} KB)", f.size() / 1024.0)}
                        </span>
                    }.into_any(),
                    None => view! {
                        <span class="import-dialog__filehint">"Aucun fichier sélectionné"</span>
                    }.into_any(),
                }}
            </div>

            <Show when=uploading>
                <Flex align=FlexAlign::Center gap=FlexGap::Small>
                    <Spinner />
                    "Import en cours..."
                </Flex>
            </Show>

            {move || state.with(|s| s.error().map(str::to_string)).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || state.with(|s| s.result().cloned()).map(result_view)}
        </Modal>
    }
}
