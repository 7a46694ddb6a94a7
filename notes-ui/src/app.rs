//! App Root Component
//!
//! Restores a stored session and switches between login and dashboard.

use leptos::*;

use crate::pages::{Dashboard, Login};
use crate::state::global::{provide_global_state, GlobalState};
use crate::state::session;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Resume a previous session
    if let Some(user) = session::restore() {
        state.user.set(Some(user));
        state.refresh();
    }

    let logged_in = move || state.user.with(|u| u.is_some());

    view! {
        <div class="min-h-screen bg-gray-900 text-white">
            <Show when=logged_in fallback=|| view! { <Login /> }>
                <Dashboard />
            </Show>
        </div>
    }
}
