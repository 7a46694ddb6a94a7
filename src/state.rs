//! Application State
//!
//! The whole client state as one value, changed only by applying an
//! [`Action`]. Nothing here performs I/O; the controller in
//! [`crate::app`] turns API results into actions.

use crate::model::{Note, Session, Tenant};

/// Tenant slug preselected on the login form
pub const DEFAULT_TENANT: &str = "acme";

/// Single-slot status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    Success(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Error(m) | Banner::Success(m) => m,
        }
    }
}

/// Contents of the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub tenant: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            tenant: DEFAULT_TENANT.to_string(),
        }
    }
}

impl LoginForm {
    /// Email and password are required
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// Contents of the note form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

impl NoteForm {
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// The open create/edit modal
///
/// `editing` decides whether a submit updates that note or creates a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteEditor {
    pub editing: Option<Note>,
    pub form: NoteForm,
}

/// Everything the view renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub session: Option<Session>,
    pub tenant: Option<Tenant>,
    /// In server order
    pub notes: Vec<Note>,
    pub loading: bool,
    pub banner: Option<Banner>,
    pub login_form: LoginForm,
    pub editor: Option<NoteEditor>,
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SessionStarted(Session),
    LoggedOut,
    TenantLoaded(Tenant),
    NotesLoaded(Vec<Note>),
    LoadingStarted,
    LoadingFinished,
    Failed(String),
    Succeeded(String),
    /// Drop an error banner, keep a success one
    ClearError,
    DismissBanner,
    LoginFormChanged(LoginForm),
    OpenCreate,
    OpenEdit(Note),
    NoteFormChanged(NoteForm),
    CloseEditor,
}

impl AppState {
    /// Dashboard when a session is held, login otherwise
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The create control is off only for a free tenant at its limit
    pub fn can_create_note(&self) -> bool {
        self.tenant.as_ref().map_or(true, |t| !t.limit_reached())
    }

    pub fn find_note(&self, id: &crate::model::Id) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    /// Consume and return the next state
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SessionStarted(session) => {
                self.session = Some(session);
                self.login_form = LoginForm::default();
            }
            Action::LoggedOut => {
                self.session = None;
                self.tenant = None;
                self.notes = Vec::new();
                self.editor = None;
                self.banner = None;
                self.loading = false;
            }
            Action::TenantLoaded(tenant) => self.tenant = Some(tenant),
            Action::NotesLoaded(notes) => self.notes = notes,
            Action::LoadingStarted => self.loading = true,
            Action::LoadingFinished => self.loading = false,
            Action::Failed(message) => self.banner = Some(Banner::Error(message)),
            Action::Succeeded(message) => self.banner = Some(Banner::Success(message)),
            Action::ClearError => {
                if matches!(self.banner, Some(Banner::Error(_))) {
                    self.banner = None;
                }
            }
            Action::DismissBanner => self.banner = None,
            Action::LoginFormChanged(form) => self.login_form = form,
            Action::OpenCreate => self.editor = Some(NoteEditor::default()),
            Action::OpenEdit(note) => {
                let form = NoteForm {
                    title: note.title.clone(),
                    content: note.content.clone().unwrap_or_default(),
                };
                self.editor = Some(NoteEditor {
                    editing: Some(note),
                    form,
                });
            }
            Action::NoteFormChanged(form) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.form = form;
                }
            }
            Action::CloseEditor => self.editor = None,
        }
    }
}
