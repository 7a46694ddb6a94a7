//! Create / edit note dialog

use leptos::*;

use crate::api::{self, ApiError};
use crate::state::global::{GlobalState, Note};

pub const NOTE_CREATED: &str = "Note created successfully!";
pub const NOTE_UPDATED: &str = "Note updated successfully!";
pub const NOTE_LIMIT_MESSAGE: &str = "You have reached the maximum number of notes for the Free plan. Please upgrade to Pro for unlimited notes.";

/// Banner text for a failed save
fn failure_message(error: &ApiError) -> &str {
    if error.is_note_limit() {
        NOTE_LIMIT_MESSAGE
    } else {
        &error.error
    }
}

/// Dialog state, provided by the dashboard
#[derive(Clone, Copy)]
pub struct NoteEditor {
    pub open: RwSignal<bool>,
    /// Note being edited; `None` means create
    pub editing: RwSignal<Option<Note>>,
    pub title: RwSignal<String>,
    pub content: RwSignal<String>,
}

impl NoteEditor {
    pub fn new() -> Self {
        Self {
            open: create_rw_signal(false),
            editing: create_rw_signal(None),
            title: create_rw_signal(String::new()),
            content: create_rw_signal(String::new()),
        }
    }

    pub fn open_create(&self) {
        self.editing.set(None);
        self.title.set(String::new());
        self.content.set(String::new());
        self.open.set(true);
    }

    pub fn open_edit(&self, note: Note) {
        self.title.set(note.title.clone());
        self.content.set(note.content.clone().unwrap_or_default());
        self.editing.set(Some(note));
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
        self.editing.set(None);
        self.title.set(String::new());
        self.content.set(String::new());
    }
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn NoteModal(editor: NoteEditor) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let is_editing = move || editor.editing.with(|n| n.is_some());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let title = editor.title.get_untracked();
        let content = editor.content.get_untracked();
        if title.trim().is_empty() {
            return;
        }
        let editing = editor.editing.get_untracked();

        state.loading.set(true);
        state.clear_error();

        spawn_local(async move {
            let result = match &editing {
                Some(note) => api::update_note(&note.id, &title, &content).await,
                None => api::create_note(&title, &content).await,
            };

            match result {
                Ok(()) => {
                    state.show_success(if editing.is_some() { NOTE_UPDATED } else { NOTE_CREATED });
                    editor.close();
                    state.refresh();
                }
                Err(e) => state.show_error(failure_message(&e)),
            }
            state.loading.set(false);
        });
    };

    view! {
        <Show when=move || editor.open.get()>
            <div class="fixed inset-0 bg-black/60 flex items-center justify-center z-50">
                <div class="bg-gray-800 rounded-lg p-6 w-full max-w-lg">
                    <h2 class="text-xl font-bold mb-4">
                        {move || if is_editing() { "Edit Note" } else { "Create Note" }}
                    </h2>
                    <form on:submit=on_submit class="space-y-4">
                        <div>
                            <label class="block text-sm text-gray-400 mb-1">"Title"</label>
                            <input
                                type="text"
                                required
                                class="w-full bg-gray-700 rounded px-3 py-2"
                                prop:value=move || editor.title.get()
                                on:input=move |ev| editor.title.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm text-gray-400 mb-1">"Content"</label>
                            <textarea
                                rows="6"
                                class="w-full bg-gray-700 rounded px-3 py-2"
                                prop:value=move || editor.content.get()
                                on:input=move |ev| editor.content.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="flex justify-end space-x-2">
                            <button
                                type="button"
                                class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded"
                                on:click=move |_| editor.close()
                            >
                                "Cancel"
                            </button>
                            <button
                                type="submit"
                                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded disabled:opacity-50"
                                disabled=move || state.loading.get()
                            >
                                {move || match (state.loading.get(), is_editing()) {
                                    (true, _) => "Saving...",
                                    (false, true) => "Update Note",
                                    (false, false) => "Create Note",
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
