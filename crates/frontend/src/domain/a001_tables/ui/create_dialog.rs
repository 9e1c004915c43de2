use crate::shared::modal::Modal;
use crate::shared::submit::OnSubmit;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Collects (region, assembly) for a new table; both required after trim.
#[component]
pub fn CreateTableDialog(
    on_create: OnSubmit<(String, String)>,
    on_close: Callback<()>,
) -> impl IntoView {
    let region = RwSignal::new(String::new());
    let assembly = RwSignal::new(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let on_create = StoredValue::new_local(on_create);

    let is_valid = move || !region.get().trim().is_empty() && !assembly.get().trim().is_empty();

    let reset = move || {
        region.set(String::new());
        assembly.set(String::new());
        set_error.set(None);
    };

    let handle_close = Callback::new(move |_: ()| {
        if submitting.get_untracked() {
            return;
        }
        reset();
        on_close.run(());
    });

    let submit = move || {
        let r = region.get_untracked().trim().to_string();
        let a = assembly.get_untracked().trim().to_string();
        if r.is_empty() || a.is_empty() || submitting.get_untracked() {
            return;
        }
        log::debug!("Creating table {} - {}", r, a);
        set_submitting.set(true);
        set_error.set(None);
        let create = on_create.get_value();
        spawn_local(async move {
            let outcome = create((r, a)).await;
            let _ = set_submitting.try_set(false);
            match outcome {
                Ok(()) => {
                    reset();
                    on_close.run(());
                }
                Err(message) => {
                    let _ = set_error.try_set(Some(message));
                }
            }
        });
    };

    view! {
        <Modal
            title="Créer un nouveau tableau".to_string()
            on_close=handle_close
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle_close.run(())>
                    "Annuler"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| submit()
                    disabled=Signal::derive(move || !is_valid() || submitting.get())
                >
                    "Créer le tableau"
                </Button>
            }
        >
            <p class="modal-description">"Chaque tableau est identifié par une région et une assemblée"</p>
            <form on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }>
                <div class="form-group">
                    <label for="region">"Région"</label>
                    <Input value=region placeholder="Ex: Borgou, Atacora..." />
                </div>
                <div class="form-group">
                    <label for="assembly">"Assemblée"</label>
                    <Input value=assembly placeholder="Ex: Parakou, Natitingou..." />
                </div>
                <button type="submit" class="hidden"></button>
            </form>
            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
        </Modal>
    }
}
