//! Note Card Component

use leptos::*;

use crate::state::global::{Id, Note};

const NO_CONTENT: &str = "No content";

#[component]
pub fn NoteCard(
    note: Note,
    #[prop(into)] on_edit: Callback<Note>,
    #[prop(into)] on_delete: Callback<Id>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let created = note.created_date();
    let content = note
        .content
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| NO_CONTENT.to_string());
    let title = note.title.clone();
    let id = note.id.clone();

    view! {
        <div class="bg-gray-800 rounded-lg p-4 flex flex-col">
            <h3 class="text-lg font-semibold mb-2">{title}</h3>
            <p class="text-gray-300 text-sm flex-1 whitespace-pre-wrap">{content}</p>
            <div class="flex items-center justify-between mt-4 text-xs text-gray-400">
                <span>"Created: " {created}</span>
                <div class="space-x-2">
                    <button
                        class="px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded"
                        on:click=move |_| on_edit.call(note.clone())
                    >
                        "Edit"
                    </button>
                    <button
                        class="px-3 py-1 bg-red-700 hover:bg-red-600 rounded disabled:opacity-50"
                        disabled=move || loading.get()
                        on:click=move |_| on_delete.call(id.clone())
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
