//! Login Page

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;
use crate::state::session;

const TENANTS: &[(&str, &str)] = &[("acme", "Acme Corporation"), ("globex", "Globex Corporation")];

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (tenant, set_tenant) = create_signal("acme".to_string());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let (e, p, t) = (email.get(), password.get(), tenant.get());
        if e.is_empty() || p.is_empty() || t.is_empty() {
            return;
        }

        state.loading.set(true);
        state.clear_error();

        spawn_local(async move {
            match api::login(&e, &p, &t).await {
                Ok(response) => {
                    session::persist(&response.token, &response.user);
                    state.user.set(Some(response.user));
                    state.refresh();
                }
                Err(err) => state.show_error(&err.error),
            }
            state.loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="bg-gray-800 rounded-lg p-8 w-full max-w-md">
                <h1 class="text-2xl font-bold text-center">"SaaS Notes App"</h1>
                <p class="text-gray-400 text-center mb-6">"Multi-tenant note management system"</p>

                <h2 class="text-xl font-semibold mb-4">"Login"</h2>

                {move || state.banner.get().and_then(|banner| match banner {
                    crate::state::global::Banner::Error(msg) => Some(view! {
                        <div class="bg-red-600 text-white px-4 py-2 rounded mb-4 text-sm">{msg}</div>
                    }),
                    crate::state::global::Banner::Success(_) => None,
                })}

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-1">"Email"</label>
                        <input
                            type="email"
                            required
                            class="w-full bg-gray-700 rounded px-3 py-2"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm text-gray-400 mb-1">"Password"</label>
                        <input
                            type="password"
                            required
                            class="w-full bg-gray-700 rounded px-3 py-2"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm text-gray-400 mb-1">"Tenant"</label>
                        <select
                            class="w-full bg-gray-700 rounded px-3 py-2"
                            prop:value=tenant
                            on:change=move |ev| set_tenant.set(event_target_value(&ev))
                        >
                            {TENANTS
                                .iter()
                                .map(|(slug, name)| view! { <option value={*slug}>{*name}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <button
                        type="submit"
                        class="w-full py-2 bg-blue-600 hover:bg-blue-700 rounded font-medium disabled:opacity-50"
                        disabled=move || state.loading.get()
                    >
                        {move || if state.loading.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>

                <div class="mt-6 text-sm text-gray-400">
                    <h3 class="font-semibold mb-1">"Test Accounts:"</h3>
                    <p>"Acme: admin@acme.test / user@acme.test"</p>
                    <p>"Globex: admin@globex.test / user@globex.test"</p>
                    <p>"Password: password (for all accounts)"</p>
                </div>
            </div>
        </div>
    }
}
