use crate::domain::a001_tables::ui::details::TableDetails;
use crate::domain::a001_tables::ui::list::TableList;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("/") view=TableList />
                <Route path=path!("/table/:region/:assembly") view=TableDetails />
            </Routes>
        </Router>
    }
}
