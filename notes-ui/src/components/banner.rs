//! Banner Component
//!
//! Shows the current success or error message until dismissed.

use leptos::*;

use crate::state::global::{self, GlobalState};

#[component]
pub fn Banner() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        state.banner.get().map(|banner| {
            let (message, class) = match banner {
                global::Banner::Error(msg) => (msg, "bg-red-600"),
                global::Banner::Success(msg) => (msg, "bg-green-600"),
            };

            view! {
                <div class=format!(
                    "flex items-center justify-between {} text-white px-4 py-3 rounded-lg mb-4",
                    class
                )>
                    <span class="text-sm font-medium">{message}</span>
                    <button
                        class="ml-4 text-lg leading-none"
                        on:click=move |_| state.clear_messages()
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
