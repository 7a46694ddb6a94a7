//! Client Controller
//!
//! Runs the user-facing flows (login, logout, note CRUD, plan upgrade)
//! against the API and folds every result into [`AppState`] through
//! [`Action`]s.
//!
//! ## Flow
//!
//! 1. A handler validates its input and asks for confirmation if needed
//! 2. It sets the loading flag and issues one request through [`ApiClient`]
//! 3. On success the tenant and notes are re-fetched from the server
//! 4. Any failure becomes the single error banner; nothing is retried

use crate::api::ApiClient;
use crate::config::Config;
use crate::model::{Id, LoginRequest, NoteInput};
use crate::session::{FileStorage, SessionStore};
use crate::state::{Action, AppState, LoginForm, NoteForm};
use crate::view::{render, View};
use std::sync::Arc;

pub const NOTE_LIMIT_MESSAGE: &str = "You have reached the maximum number of notes for the Free plan. Please upgrade to Pro for unlimited notes.";
pub const NOTE_CREATED: &str = "Note created successfully!";
pub const NOTE_UPDATED: &str = "Note updated successfully!";
pub const NOTE_DELETED: &str = "Note deleted successfully!";
pub const UPGRADED: &str = "Successfully upgraded to Pro! You now have unlimited notes.";
pub const TENANT_FETCH_FAILED: &str = "Failed to fetch tenant information";
pub const NOTES_FETCH_FAILED: &str = "Failed to fetch notes";
pub const DELETE_FAILED: &str = "Failed to delete note";
pub const UPGRADE_FAILED: &str = "Failed to upgrade tenant";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this note?";
pub const CONFIRM_UPGRADE: &str = "Are you sure you want to upgrade to Pro?";

/// Interactive yes/no question
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// How a handler ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded
    Completed,
    /// The request failed; the error banner is set
    Failed,
    /// A guard stopped the action before any request was sent
    Aborted,
}

/// The client application
pub struct NotesApp {
    state: AppState,
    api: ApiClient,
    session: SessionStore,
    confirm: Box<dyn Confirm>,
}

impl NotesApp {
    pub fn new(api: ApiClient, session: SessionStore, confirm: impl Confirm + 'static) -> Self {
        Self {
            state: AppState::default(),
            api,
            session,
            confirm: Box::new(confirm),
        }
    }

    /// App backed by the configured session file and API base URL
    pub fn from_config(config: &Config, confirm: impl Confirm + 'static) -> Self {
        let session = SessionStore::new(Arc::new(FileStorage::new(&config.session.file)));
        let api = ApiClient::new(config.api.resolved_base_url(), session.clone());
        Self::new(api, session, confirm)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> View {
        render(&self.state)
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        self.state.apply(action);
    }

    /// Restore a persisted session and, if there is one, load the dashboard
    pub async fn start(&mut self) {
        if let Some(session) = self.session.restore() {
            self.dispatch(Action::SessionStarted(session));
            self.refresh().await;
        }
    }

    pub fn set_login_form(&mut self, form: LoginForm) {
        self.dispatch(Action::LoginFormChanged(form));
    }

    /// Submit the login form
    pub async fn login(&mut self) -> Outcome {
        let form = self.state.login_form.clone();
        if !form.is_complete() || self.state.loading {
            return Outcome::Aborted;
        }

        self.dispatch(Action::ClearError);
        self.dispatch(Action::LoadingStarted);

        let credentials = LoginRequest {
            email: form.email.trim().to_string(),
            password: form.password,
            tenant: form.tenant,
        };
        let result = match self.api.login(&credentials).await {
            Ok(session) => self.session.persist(&session).map(|_| session),
            Err(e) => Err(e),
        };
        self.dispatch(Action::LoadingFinished);

        match result {
            Ok(session) => {
                tracing::info!(email = %session.user.email, "Logged in");
                self.dispatch(Action::SessionStarted(session));
                self.refresh().await;
                Outcome::Completed
            }
            Err(e) => {
                tracing::warn!(email = %credentials.email, "Login failed: {}", e);
                self.dispatch(Action::Failed(e.to_string()));
                Outcome::Failed
            }
        }
    }

    /// Drop the session unconditionally
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
        self.dispatch(Action::LoggedOut);
        tracing::info!("Logged out");
    }

    /// Re-fetch tenant and notes together
    pub async fn refresh(&mut self) {
        let (tenant, notes) = tokio::join!(self.api.tenant(), self.api.list_notes());
        self.apply_tenant(tenant);
        self.apply_notes(notes);
    }

    pub async fn refresh_tenant(&mut self) {
        let tenant = self.api.tenant().await;
        self.apply_tenant(tenant);
    }

    pub async fn refresh_notes(&mut self) {
        let notes = self.api.list_notes().await;
        self.apply_notes(notes);
    }

    fn apply_tenant(&mut self, result: crate::error::ClientResult<crate::model::Tenant>) {
        match result {
            Ok(tenant) => self.dispatch(Action::TenantLoaded(tenant)),
            Err(e) => {
                tracing::warn!("Tenant fetch failed: {}", e);
                self.dispatch(Action::Failed(TENANT_FETCH_FAILED.to_string()));
            }
        }
    }

    fn apply_notes(&mut self, result: crate::error::ClientResult<Vec<crate::model::Note>>) {
        match result {
            Ok(notes) => self.dispatch(Action::NotesLoaded(notes)),
            Err(e) => {
                tracing::warn!("Notes fetch failed: {}", e);
                self.dispatch(Action::Failed(NOTES_FETCH_FAILED.to_string()));
            }
        }
    }

    pub fn open_create(&mut self) {
        self.dispatch(Action::OpenCreate);
    }

    /// Open the modal on a held note; false if no such note is held
    pub fn open_edit(&mut self, id: &Id) -> bool {
        match self.state.find_note(id).cloned() {
            Some(note) => {
                self.dispatch(Action::OpenEdit(note));
                true
            }
            None => false,
        }
    }

    pub fn set_note_form(&mut self, form: NoteForm) {
        self.dispatch(Action::NoteFormChanged(form));
    }

    pub fn close_editor(&mut self) {
        self.dispatch(Action::CloseEditor);
    }

    /// Submit the open modal: update when editing, create otherwise
    pub async fn submit_note(&mut self) -> Outcome {
        let editor = match &self.state.editor {
            Some(editor) if editor.form.is_complete() && !self.state.loading => editor.clone(),
            _ => return Outcome::Aborted,
        };

        self.dispatch(Action::ClearError);
        self.dispatch(Action::LoadingStarted);

        let input = NoteInput {
            title: editor.form.title,
            content: editor.form.content,
        };
        let (result, success) = match &editor.editing {
            Some(note) => (self.api.update_note(&note.id, &input).await, NOTE_UPDATED),
            None => (self.api.create_note(&input).await, NOTE_CREATED),
        };

        let outcome = match result {
            Ok(()) => {
                self.dispatch(Action::Succeeded(success.to_string()));
                self.dispatch(Action::CloseEditor);
                self.refresh().await;
                Outcome::Completed
            }
            Err(e) if e.is_note_limit() => {
                tracing::warn!("Note limit reached: {}", e);
                self.dispatch(Action::Failed(NOTE_LIMIT_MESSAGE.to_string()));
                Outcome::Failed
            }
            Err(e) => {
                tracing::warn!("Saving note failed: {}", e);
                self.dispatch(Action::Failed(e.to_string()));
                Outcome::Failed
            }
        };

        self.dispatch(Action::LoadingFinished);
        outcome
    }

    /// Delete a note after confirmation
    pub async fn delete_note(&mut self, id: &Id) -> Outcome {
        if self.state.loading || !self.confirm.confirm(CONFIRM_DELETE) {
            return Outcome::Aborted;
        }

        self.dispatch(Action::LoadingStarted);
        let outcome = match self.api.delete_note(id).await {
            Ok(()) => {
                self.dispatch(Action::Succeeded(NOTE_DELETED.to_string()));
                self.refresh().await;
                Outcome::Completed
            }
            Err(e) => {
                tracing::warn!(note = %id, "Delete failed: {}", e);
                self.dispatch(Action::Failed(DELETE_FAILED.to_string()));
                Outcome::Failed
            }
        };
        self.dispatch(Action::LoadingFinished);
        outcome
    }

    /// Upgrade the user's tenant to Pro after confirmation
    pub async fn upgrade(&mut self) -> Outcome {
        let tenant = match &self.state.session {
            Some(session) if !self.state.loading => session.user.tenant.clone(),
            _ => return Outcome::Aborted,
        };
        if !self.confirm.confirm(CONFIRM_UPGRADE) {
            return Outcome::Aborted;
        }

        self.dispatch(Action::LoadingStarted);
        let outcome = match self.api.upgrade_tenant(&tenant).await {
            Ok(()) => {
                tracing::info!(tenant = %tenant, "Upgraded to Pro");
                self.dispatch(Action::Succeeded(UPGRADED.to_string()));
                self.refresh_tenant().await;
                Outcome::Completed
            }
            Err(e) => {
                tracing::warn!(tenant = %tenant, "Upgrade failed: {}", e);
                self.dispatch(Action::Failed(UPGRADE_FAILED.to_string()));
                Outcome::Failed
            }
        };
        self.dispatch(Action::LoadingFinished);
        outcome
    }

    pub fn dismiss_banner(&mut self) {
        self.dispatch(Action::DismissBanner);
    }
}
