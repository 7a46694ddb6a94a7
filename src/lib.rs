//! # SaaS Notes
//!
//! Client for a multi-tenant note-taking service. Authenticates against a
//! tenant-scoped login endpoint, shows a dashboard of notes and the tenant's
//! plan, and lets the user create, edit and delete notes or upgrade the
//! tenant to the Pro plan.
//!
//! ## Features
//!
//! - **Session persistence**: token and user survive restarts
//! - **Single gateway**: every request goes through one API client
//! - **Server is the source of truth**: each mutation re-fetches tenant and notes
//! - **Plan limits**: the free-plan note ceiling is modelled explicitly
//!
//! ## Modules
//!
//! - [`api`]: HTTP gateway to the notes backend
//! - [`session`]: Durable session store
//! - [`state`]: Application state and its actions
//! - [`app`]: Controller running the user flows
//! - [`view`]: Pure state-to-view renderer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use saas_notes::{Config, LoginForm, NotesApp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let mut app = NotesApp::from_config(&config, |_: &str| true);
//!
//!     // Restore a previous session, if any
//!     app.start().await;
//!
//!     if !app.state().is_authenticated() {
//!         app.set_login_form(LoginForm {
//!             email: "admin@acme.test".to_string(),
//!             password: "password".to_string(),
//!             tenant: "acme".to_string(),
//!         });
//!         app.login().await;
//!     }
//!
//!     println!("{}", app.view());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use app::{Confirm, NotesApp, Outcome};
pub use config::{generate_default_config, ApiConfig, Config, ConfigError, Environment, LoggingConfig};
pub use error::{ClientError, ClientResult};
pub use model::{Id, LoginRequest, Note, NoteInput, Plan, PlanLimit, Role, Session, Tenant, User};
pub use session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
pub use state::{Action, AppState, Banner, LoginForm, NoteEditor, NoteForm};
pub use view::{render, View};
