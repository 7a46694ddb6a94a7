//! View Renderer
//!
//! Pure function from [`AppState`] to a [`View`]: the login form when no
//! session is held, the dashboard otherwise. The `Display` impls are the
//! terminal rendering.

use std::fmt;

use crate::model::{Id, Plan};
use crate::state::{AppState, Banner};

pub const APP_TITLE: &str = "SaaS Notes App";
pub const NO_CONTENT: &str = "No content";
pub const EMPTY_NOTES: &str = "No notes yet. Create your first note!";

/// Tenants offered on the login form: (slug, display name)
pub const TENANTS: &[(&str, &str)] = &[
    ("acme", "Acme Corporation"),
    ("globex", "Globex Corporation"),
];

/// Demo accounts hint on the login form
pub const TEST_ACCOUNTS: &[&str] = &[
    "Acme: admin@acme.test / user@acme.test",
    "Globex: admin@globex.test / user@globex.test",
    "Password: password (for all accounts)",
];

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Login(LoginView),
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginView {
    /// Only errors are shown before login
    pub error: Option<String>,
    pub email: String,
    pub tenant: String,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanPanel {
    pub tenant_name: String,
    /// Upper-cased, e.g. "FREE"
    pub plan: String,
    pub role: String,
    pub usage: String,
    pub is_pro: bool,
    /// Admins on the free plan only
    pub upgrade: Option<ButtonView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimitPrompt {
    pub message: String,
    pub upgrade: Option<ButtonView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteCard {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteModal {
    pub heading: &'static str,
    pub title: String,
    pub content: String,
    pub submit: ButtonView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub welcome: String,
    pub banner: Option<Banner>,
    pub plan: Option<PlanPanel>,
    pub limit_prompt: Option<LimitPrompt>,
    pub create: ButtonView,
    pub notes: Vec<NoteCard>,
    pub modal: Option<NoteModal>,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Render the current state
pub fn render(state: &AppState) -> View {
    match &state.session {
        None => View::Login(render_login(state)),
        Some(session) => View::Dashboard(render_dashboard(state, session)),
    }
}

fn render_login(state: &AppState) -> LoginView {
    let error = match &state.banner {
        Some(Banner::Error(message)) => Some(message.clone()),
        _ => None,
    };
    LoginView {
        error,
        email: state.login_form.email.clone(),
        tenant: state.login_form.tenant.clone(),
        submit_label: if state.loading { "Logging in..." } else { "Login" },
        submit_disabled: state.loading,
    }
}

fn render_dashboard(state: &AppState, session: &crate::model::Session) -> DashboardView {
    let user = &session.user;

    let plan = state.tenant.as_ref().map(|tenant| PlanPanel {
        tenant_name: tenant.name.clone(),
        plan: tenant.plan.to_string().to_uppercase(),
        role: user.role.to_string().to_uppercase(),
        usage: tenant.usage_label(),
        is_pro: tenant.plan == Plan::Pro,
        upgrade: (tenant.plan == Plan::Free && user.is_admin()).then(|| ButtonView {
            label: if state.loading { "Upgrading..." } else { "Upgrade to Pro" },
            disabled: state.loading,
        }),
    });

    let limit_prompt = state.tenant.as_ref().and_then(|tenant| {
        let max: Option<u32> = tenant.limit.into();
        match (tenant.limit_reached(), max) {
            (true, Some(max)) => Some(LimitPrompt {
                message: format!(
                    "You have used all {} notes available in your Free plan.",
                    max
                ),
                upgrade: user.is_admin().then(|| ButtonView {
                    label: "Upgrade to Pro for unlimited notes",
                    disabled: state.loading,
                }),
            }),
            _ => None,
        }
    });

    let notes = state
        .notes
        .iter()
        .map(|note| NoteCard {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note
                .content
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| NO_CONTENT.to_string()),
            created: note.created_date(),
        })
        .collect();

    let modal = state.editor.as_ref().map(|editor| {
        let editing = editor.editing.is_some();
        NoteModal {
            heading: if editing { "Edit Note" } else { "Create Note" },
            title: editor.form.title.clone(),
            content: editor.form.content.clone(),
            submit: ButtonView {
                label: match (state.loading, editing) {
                    (true, _) => "Saving...",
                    (false, true) => "Update Note",
                    (false, false) => "Create Note",
                },
                disabled: state.loading,
            },
        }
    });

    DashboardView {
        welcome: format!("Welcome back, {}!", user.email),
        banner: state.banner.clone(),
        plan,
        limit_prompt,
        create: ButtonView {
            label: "Create New Note",
            disabled: !state.can_create_note(),
        },
        notes,
        modal,
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Login(login) => fmt::Display::fmt(login, f),
            View::Dashboard(dashboard) => fmt::Display::fmt(dashboard, f),
        }
    }
}

fn button(f: &mut fmt::Formatter<'_>, button: &ButtonView) -> fmt::Result {
    if button.disabled {
        writeln!(f, "  [{}] (disabled)", button.label)
    } else {
        writeln!(f, "  [{}]", button.label)
    }
}

impl fmt::Display for LoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", APP_TITLE)?;
        writeln!(f, "Multi-tenant note management system")?;
        writeln!(f)?;
        writeln!(f, "Login")?;
        if let Some(error) = &self.error {
            writeln!(f, "! {}", error)?;
        }
        writeln!(f, "  Email:    {}", self.email)?;
        let tenant = TENANTS
            .iter()
            .find(|(slug, _)| *slug == self.tenant)
            .map(|(_, name)| *name)
            .unwrap_or(self.tenant.as_str());
        writeln!(f, "  Tenant:   {}", tenant)?;
        button(
            f,
            &ButtonView {
                label: self.submit_label,
                disabled: self.submit_disabled,
            },
        )?;
        writeln!(f)?;
        writeln!(f, "Test Accounts:")?;
        for line in TEST_ACCOUNTS {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", APP_TITLE)?;
        writeln!(f, "{}", self.welcome)?;
        writeln!(f)?;

        match &self.banner {
            Some(Banner::Error(message)) => writeln!(f, "! {}", message)?,
            Some(Banner::Success(message)) => writeln!(f, "✓ {}", message)?,
            None => {}
        }

        writeln!(f, "Dashboard")?;
        if let Some(plan) = &self.plan {
            writeln!(f, "  {}", plan.tenant_name)?;
            writeln!(f, "  Plan:  {}", plan.plan)?;
            writeln!(f, "  Role:  {}", plan.role)?;
            writeln!(f, "  Notes: {}", plan.usage)?;
            if let Some(upgrade) = &plan.upgrade {
                button(f, upgrade)?;
            }
        }

        if let Some(prompt) = &self.limit_prompt {
            writeln!(f)?;
            writeln!(f, "Note limit reached!")?;
            writeln!(f, "  {}", prompt.message)?;
            if let Some(upgrade) = &prompt.upgrade {
                button(f, upgrade)?;
            }
        }

        writeln!(f)?;
        button(f, &self.create)?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "{}", EMPTY_NOTES)?;
        }
        for note in &self.notes {
            writeln!(f, "#{} {}", note.id, note.title)?;
            for line in note.content.lines() {
                writeln!(f, "    {}", line)?;
            }
            writeln!(f, "    Created: {}", note.created)?;
        }

        if let Some(modal) = &self.modal {
            writeln!(f)?;
            writeln!(f, "{}", modal.heading)?;
            writeln!(f, "  Title:   {}", modal.title)?;
            writeln!(f, "  Content: {}", modal.content)?;
            button(f, &modal.submit)?;
        }
        Ok(())
    }
}
