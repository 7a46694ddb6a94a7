//! Dashboard Page
//!
//! Plan information, the note grid and the note dialog.

use leptos::*;

use crate::api;
use crate::components::{Banner, LimitPrompt, NoteCard, NoteEditor, NoteModal, PlanInfo};
use crate::state::global::{GlobalState, Id, Note};

pub const NOTE_DELETED: &str = "Note deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete note";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this note?";

fn delete_note(state: GlobalState, id: Id) {
    let confirmed = window()
        .confirm_with_message(CONFIRM_DELETE)
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    state.loading.set(true);
    spawn_local(async move {
        match api::delete_note(&id).await {
            Ok(()) => {
                state.show_success(NOTE_DELETED);
                state.refresh();
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Delete {} failed: {}", id, e).into());
                state.show_error(DELETE_FAILED);
            }
        }
        state.loading.set(false);
    });
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let editor = NoteEditor::new();

    let welcome = move || {
        state
            .user
            .with(|u| u.as_ref().map(|u| format!("Welcome back, {}!", u.email)))
    };

    view! {
        <div class="max-w-5xl mx-auto px-4 py-8">
            <header class="flex items-center justify-between mb-6">
                <div>
                    <h1 class="text-2xl font-bold">"SaaS Notes App"</h1>
                    <p class="text-gray-400">{welcome}</p>
                </div>
                <button
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                    on:click=move |_| state.logout()
                >
                    "Logout"
                </button>
            </header>

            <Banner />

            <h2 class="text-xl font-semibold mb-4">"Dashboard"</h2>

            <PlanInfo />
            <LimitPrompt />

            <div class="flex items-center justify-between mb-4">
                <h3 class="text-lg font-semibold">"Notes"</h3>
                <button
                    class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg disabled:opacity-50"
                    disabled=move || !state.can_create_note()
                    on:click=move |_| editor.open_create()
                >
                    "Create New Note"
                </button>
            </div>

            <Show
                when=move || state.notes.with(|notes| !notes.is_empty())
                fallback=|| view! {
                    <p class="text-center text-gray-400 py-12">
                        "No notes yet. Create your first note!"
                    </p>
                }
            >
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                    <For
                        each=move || state.notes.get()
                        key=|note| (note.id.to_string(), note.title.clone(), note.content.clone())
                        children=move |note: Note| view! {
                            <NoteCard
                                note=note
                                on_edit=move |note: Note| editor.open_edit(note)
                                on_delete=move |id: Id| delete_note(state, id)
                                loading=state.loading
                            />
                        }
                    />
                </div>
            </Show>

            <NoteModal editor=editor />
        </div>
    }
}
