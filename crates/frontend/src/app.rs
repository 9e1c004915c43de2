use crate::domain::a001_tables::api;
use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::api_config;
use crate::shared::icons::icon;
use crate::shared::notify::{NoticeHost, Notifier};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Result of the one-time liveness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackendStatus {
    Checking,
    Ready,
    Unreachable,
}

#[component]
fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <div class="startup-screen startup-screen--error">
            {icon("x")}
            <h2>"Configuration invalide"</h2>
            <p>{message}</p>
            <p class="startup-screen__hint">
                "Définissez EXCELDB_API_URL avec l'adresse du service avant de construire l'application"
            </p>
        </div>
    }
}

#[component]
fn ConnectedApp(base_url: String) -> impl IntoView {
    let (status, set_status) = signal(BackendStatus::Checking);

    spawn_local(async move {
        let next = match api::check_backend().await {
            Ok(_) => BackendStatus::Ready,
            Err(_) => BackendStatus::Unreachable,
        };
        let _ = set_status.try_set(next);
    });

    view! {
        {move || match status.get() {
            BackendStatus::Checking => view! {
                <div class="startup-screen">
                    <Spinner />
                    <p>"Connexion au backend..."</p>
                </div>
            }.into_any(),
            BackendStatus::Unreachable => view! {
                <div class="startup-screen startup-screen--error">
                    {icon("x")}
                    <h2>"Backend non accessible"</h2>
                    <p>{format!("Le service {} ne répond pas", base_url)}</p>
                </div>
            }.into_any(),
            BackendStatus::Ready => view! { <AppRoutes /> }.into_any(),
        }}
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(Notifier::new());

    let body = match api_config() {
        Ok(config) => view! { <ConnectedApp base_url=config.base_url().to_string() /> }.into_any(),
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            view! { <ConfigErrorScreen message=e.to_string() /> }.into_any()
        }
    };

    view! {
        <ConfigProvider>
            {body}
            <NoticeHost />
        </ConfigProvider>
    }
}
