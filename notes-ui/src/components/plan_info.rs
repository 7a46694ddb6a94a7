//! Plan information panel and note-limit prompt

use leptos::*;

use crate::api;
use crate::state::global::{GlobalState, PlanLimit};

pub const UPGRADED: &str = "Successfully upgraded to Pro! You now have unlimited notes.";
pub const UPGRADE_FAILED: &str = "Failed to upgrade tenant";
pub const CONFIRM_UPGRADE: &str = "Are you sure you want to upgrade to Pro?";

/// Ask for confirmation, then upgrade the tenant and re-fetch it
fn upgrade(state: GlobalState) {
    let Some(tenant) = state.user.with_untracked(|u| u.as_ref().map(|u| u.tenant.clone())) else {
        return;
    };
    let confirmed = window()
        .confirm_with_message(CONFIRM_UPGRADE)
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    state.loading.set(true);
    spawn_local(async move {
        match api::upgrade_tenant(&tenant).await {
            Ok(()) => {
                state.show_success(UPGRADED);
                state.refresh_tenant();
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Upgrade failed: {}", e).into());
                state.show_error(UPGRADE_FAILED);
            }
        }
        state.loading.set(false);
    });
}

fn is_admin(state: &GlobalState) -> bool {
    state.user.with(|u| u.as_ref().map_or(false, |u| u.is_admin()))
}

/// Tenant name, plan, role and usage
#[component]
pub fn PlanInfo() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        let tenant = state.tenant.get()?;
        let role = state.user.with(|u| u.as_ref().map(|u| u.role_label()))?;
        let show_upgrade = tenant.is_free() && is_admin(&state);

        Some(view! {
            <div class="bg-gray-800 rounded-lg p-4 mb-6 flex items-center justify-between">
                <div>
                    <h3 class="text-lg font-semibold">{tenant.name.clone()}</h3>
                    <p class="text-sm text-gray-400">
                        "Plan: "
                        <span class={if tenant.is_free() { "text-yellow-400" } else { "text-green-400" }}>
                            {tenant.plan.to_uppercase()}
                        </span>
                        " | Role: " {role}
                        " | Notes: " {tenant.usage_label()}
                    </p>
                </div>
                <Show when=move || show_upgrade>
                    <button
                        class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg disabled:opacity-50"
                        disabled=move || state.loading.get()
                        on:click=move |_| upgrade(state)
                    >
                        {move || if state.loading.get() { "Upgrading..." } else { "Upgrade to Pro" }}
                    </button>
                </Show>
            </div>
        })
    }
}

/// Shown when a free tenant has used all of its notes
#[component]
pub fn LimitPrompt() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        let tenant = state.tenant.get().filter(|t| t.limit_reached())?;
        let PlanLimit::Limited(max) = tenant.limit else {
            return None;
        };

        Some(view! {
            <div class="bg-yellow-900 border border-yellow-600 rounded-lg p-4 mb-6">
                <h3 class="font-semibold">"Note limit reached!"</h3>
                <p class="text-sm">
                    {format!("You have used all {} notes available in your Free plan.", max)}
                </p>
                <Show when=move || is_admin(&state)>
                    <button
                        class="mt-2 px-4 py-2 bg-yellow-600 hover:bg-yellow-700 rounded-lg disabled:opacity-50"
                        disabled=move || state.loading.get()
                        on:click=move |_| upgrade(state)
                    >
                        "Upgrade to Pro for unlimited notes"
                    </button>
                </Show>
            </div>
        })
    }
}
