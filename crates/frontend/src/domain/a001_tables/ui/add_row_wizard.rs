use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::submit::OnSubmit;
use contracts::domain::a001_tables::{AddRowWizard, WizardStep};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};
use thaw::*;

/// Step-by-step row entry, one header per screen.
#[component]
pub fn AddRowWizardDialog(
    headers: Vec<String>,
    on_complete: OnSubmit<Map<String, Value>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let wizard = RwSignal::new(AddRowWizard::new(headers));
    let (error, set_error) = signal::<Option<String>>(None);
    let on_complete = StoredValue::new_local(on_complete);

    let handle_close = Callback::new(move |_: ()| {
        if wizard.with_untracked(|w| w.is_submitting()) {
            return;
        }
        wizard.update(|w| w.reset());
        set_error.set(None);
        on_close.run(());
    });

    let finish = move |step: WizardStep| {
        let payload = match step {
            WizardStep::Submit(payload) => payload,
            WizardStep::Advanced(_) | WizardStep::Ignored => return,
        };
        log::debug!("Submitting wizard row with {} field(s)", payload.len());
        set_error.set(None);
        let complete = on_complete.get_value();
        spawn_local(async move {
            match complete(payload).await {
                Ok(()) => {
                    let _ = wizard.try_update(|w| w.reset());
                    on_close.run(());
                }
                Err(message) => {
                    log::warn!("Row submission failed: {}", message);
                    let _ = wizard.try_update(|w| w.submission_failed());
                    let _ = set_error.try_set(Some(message));
                }
            }
        });
    };

    let next = move || {
        if let Some(step) = wizard.try_update(|w| w.next()) {
            finish(step);
        }
    };

    let skip = move || {
        if let Some(step) = wizard.try_update(|w| w.skip()) {
            finish(step);
        }
    };

    let back = move || {
        wizard.update(|w| {
            w.back();
        });
    };

    let is_submitting = Signal::derive(move || wizard.with(|w| w.is_submitting()));

    let next_label = move || {
        wizard.with(|w| {
            if w.is_submitting() {
                "Envoi..."
            } else if w.is_last() {
                "Terminer"
            } else {
                "Suivant"
            }
        })
    };

    view! {
        <Modal
            title="Ajouter une ligne".to_string()
            on_close=handle_close
            footer=move || view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| back()
                    disabled=Signal::derive(move || !wizard.with(|w| w.can_go_back()))
                >
                    {icon("chevron-left")}
                    " Précédent"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| skip()
                    disabled=is_submitting
                >
                    {icon("skip")}
                    " Laisser vide"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| next()
                    disabled=is_submitting
                >
                    {next_label}
                    {move || if wizard.with(|w| w.is_last()) { icon("check") } else { icon("chevron-right") }}
                </Button>
            }
        >
            <div class="wizard">
                <div class="wizard__progress">
                    <div class="wizard__progress-text">
                        <span>{move || wizard.with(|w| w.step_label())}</span>
                        <span>{move || format!("{}%", wizard.with(|w| w.progress_percent()))}</span>
                    </div>
                    <div class="wizard__progress-bar">
                        <div
                            class="wizard__progress-fill"
                            style:width=move || format!("{}%", wizard.with(|w| w.progress_percent()))
                        ></div>
                    </div>
                </div>

                <div class="form-group">
                    <label class="wizard__label">
                        {move || wizard.with(|w| w.current_header().unwrap_or_default().to_string())}
                    </label>
                    <input
                        class="form-input"
                        type="text"
                        autofocus=true
                        placeholder=move || {
                            wizard.with(|w| format!("Entrez {}", w.current_header().unwrap_or_default().to_lowercase()))
                        }
                        prop:value=move || wizard.with(|w| w.current_value())
                        disabled=move || is_submitting.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            wizard.update(|w| w.set_value(text));
                        }
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                next();
                            }
                        }
                    />
                    <p class="form-hint">"Appuyez sur Entrée pour continuer"</p>
                </div>

                <Show when=move || wizard.with(|w| !w.preview().is_empty())>
                    <div class="wizard__preview">
                        <p class="wizard__preview-title">"Données saisies :"</p>
                        {move || {
                            wizard.with(|w| w.preview())
                                .into_iter()
                                .map(|(header, text)| view! {
                                    <div class="wizard__preview-row">
                                        <span class="wizard__preview-key">{header}":"</span>
                                        <span>{text}</span>
                                    </div>
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>

                {move || error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}
            </div>
        </Modal>
    }
}
