use crate::shared::modal::Modal;
use crate::shared::submit::OnSubmit;
use contracts::domain::a001_tables::format::cell_text;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};
use thaw::*;

/// One text input per header, pre-filled with the row's current values.
#[component]
pub fn EditRowDialog(
    headers: Vec<String>,
    row_index: usize,
    initial: Map<String, Value>,
    on_save: OnSubmit<Map<String, Value>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let values = RwSignal::new(initial);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let on_save = StoredValue::new_local(on_save);

    let handle_close = Callback::new(move |_: ()| {
        if !saving.get_untracked() {
            on_close.run(());
        }
    });

    let save = move || {
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        set_error.set(None);
        let row = values.get_untracked();
        let save = on_save.get_value();
        spawn_local(async move {
            let outcome = save(row).await;
            let _ = set_saving.try_set(false);
            match outcome {
                Ok(()) => on_close.run(()),
                Err(message) => {
                    let _ = set_error.try_set(Some(message));
                }
            }
        });
    };

    let fields = headers
        .into_iter()
        .map(|header| {
            let key = header.clone();
            let key_for_input = header.clone();
            view! {
                <div class="form-group">
                    <label>{header}</label>
                    <input
                        class="form-input"
                        type="text"
                        prop:value=move || values.with(|v| cell_text(v.get(&key)))
                        disabled=move || saving.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            values.update(|v| {
                                v.insert(key_for_input.clone(), Value::String(text));
                            });
                        }
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <Modal
            title=format!("Modifier la ligne #{}", row_index)
            on_close=handle_close
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle_close.run(())>
                    "Annuler"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| save()
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Sauvegarde..." } else { "Sauvegarder" }}
                </Button>
            }
        >
            <div class="edit-form">{fields}</div>
            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
        </Modal>
    }
}
