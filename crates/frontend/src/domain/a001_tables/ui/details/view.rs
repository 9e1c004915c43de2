use super::view_model::TableDetailsViewModel;
use crate::domain::a001_tables::ui::add_row_wizard::AddRowWizardDialog;
use crate::domain::a001_tables::ui::data_table::DataTable;
use crate::domain::a001_tables::ui::edit_dialog::EditRowDialog;
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;
use contracts::domain::a001_tables::{DataRow, TableKey};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use std::rc::Rc;
use thaw::*;

fn route_key(region: Option<String>, assembly: Option<String>) -> TableKey {
    TableKey::from_route_params(
        &region.unwrap_or_default(),
        &assembly.unwrap_or_default(),
    )
}

#[component]
pub fn TableDetails() -> impl IntoView {
    let params = use_params_map();
    let current_key = move || {
        params.with(|p| route_key(p.get("region"), p.get("assembly")))
    };

    let vm = TableDetailsViewModel::new(current_key(), use_notifier(), Rc::new(use_navigate()));

    vm.load();

    // Same component instance is reused when only the route params change
    Effect::new(move |_| {
        vm.set_key(current_key());
    });

    let on_edit = Callback::new(move |row: DataRow| vm.open_edit(row));
    let add_row = StoredValue::new_local(vm.add_row_handler());
    let save_edit = StoredValue::new_local(vm.save_edit_handler());

    view! {
        <div class="table-details">
            <header class="page-header">
                <div class="page-header__title">
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.go_home()>
                        {icon("arrow-left")}
                    </Button>
                    <div>
                        <h1>{move || vm.key.with(|k| k.title())}</h1>
                        <p class="page-header__subtitle">
                            {move || {
                                let n = vm.row_count();
                                format!("{} ligne{}", n, if n == 1 { "" } else { "s" })
                            }}
                        </p>
                    </div>
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.add_open.set(true)
                    disabled=Signal::derive(move || vm.snapshot.with(|s| s.data().is_none()))
                >
                    {icon("plus")}
                    " Ajouter une ligne"
                </Button>
            </header>

            <main class="page-content">
                {move || {
                    let data = vm.snapshot.with(|s| s.data().cloned());
                    match data {
                        None => view! {
                            <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                                <Spinner />
                                "Chargement..."
                            </Flex>
                        }.into_any(),
                        Some(data) if data.rows.is_empty() => view! {
                            <div class="empty-state">
                                <p>"Aucune ligne dans ce tableau"</p>
                                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.add_open.set(true)>
                                    {icon("plus")}
                                    " Ajouter une ligne"
                                </Button>
                            </div>
                        }.into_any(),
                        Some(data) => view! {
                            <DataTable headers=data.headers rows=data.rows on_edit=on_edit />
                        }.into_any(),
                    }
                }}
                <Show when=move || vm.loading.get() && vm.snapshot.with(|s| s.data().is_some())>
                    <div class="loading-overlay"><Spinner /></div>
                </Show>
            </main>

            {move || {
                let headers = vm.snapshot.with_untracked(|s| s.data().map(|d| d.wizard_headers()));
                match (vm.add_open.get(), headers) {
                    (true, Some(headers)) => Some(view! {
                        <AddRowWizardDialog
                            headers=headers
                            on_complete=add_row.get_value()
                            on_close=Callback::new(move |_| vm.add_open.set(false))
                        />
                    }),
                    _ => None,
                }
            }}

            {move || {
                let session = vm.edit.get()?;
                let headers = vm.snapshot.with_untracked(|s| s.data().map(|d| d.headers.clone()))?;
                Some(view! {
                    <EditRowDialog
                        headers=headers
                        row_index=session.handle.row_index
                        initial=session.values
                        on_save=save_edit.get_value()
                        on_close=Callback::new(move |_| vm.close_edit())
                    />
                })
            }}
        </div>
    }
}
