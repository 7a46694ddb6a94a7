//! SaaS Notes CLI
//!
//! Terminal client for the SaaS Notes service. Each invocation restores the
//! stored session, performs one action and prints the resulting view:
//! - Log in and out
//! - Show the dashboard
//! - Create, edit and delete notes
//! - Upgrade the tenant to Pro

use anyhow::Context;
use clap::{Parser, Subcommand};
use saas_notes::config::LoggingConfig;
use saas_notes::{
    generate_default_config, Config, Environment, Id, LoginForm, NoteForm, NotesApp, Outcome,
    View,
};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "saas-notes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-tenant note management from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/saas-notes/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides the environment default
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Backend environment (production, development); replaces a base URL
    /// from the config file or SAAS_NOTES_API_URL
    #[arg(long, global = true)]
    pub env: Option<Environment>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to a tenant
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Tenant slug (acme, globex)
        #[arg(short, long, default_value = "acme")]
        tenant: String,
    },

    /// Forget the stored session
    Logout,

    /// Show plan and notes (default)
    Dashboard,

    /// Create a note
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short = 'b', long, default_value = "")]
        content: String,
    },

    /// Edit a note; omitted fields keep their current value
    Edit {
        id: Id,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short = 'b', long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        id: Id,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upgrade the tenant to the Pro plan (admins only)
    Upgrade {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);

    if let Commands::Config { output } = &command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    config.apply_cli_overrides(cli.env, cli.api_url);

    init_logging(&config.logging);
    tracing::debug!(
        "SaaS Notes v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.resolved_base_url()
    );

    let assume_yes = matches!(
        command,
        Commands::Delete { yes: true, .. } | Commands::Upgrade { yes: true }
    );
    let mut app = NotesApp::from_config(&config, move |message: &str| {
        assume_yes || ask(message)
    });
    app.start().await;

    let outcome = run(&mut app, command).await;

    print!("{}", app.view());
    if outcome == Outcome::Failed {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(app: &mut NotesApp, command: Commands) -> Outcome {
    if let Commands::Login {
        email,
        password,
        tenant,
    } = command
    {
        if let Some(session) = &app.state().session {
            eprintln!("Already logged in as {}", session.user.email);
            return Outcome::Aborted;
        }
        app.set_login_form(LoginForm {
            email,
            password,
            tenant,
        });
        return app.login().await;
    }

    if !app.state().is_authenticated() {
        eprintln!("Not logged in. Run `saas-notes login` first.");
        return Outcome::Failed;
    }

    match command {
        Commands::Logout => {
            app.logout();
            Outcome::Completed
        }

        Commands::Dashboard => Outcome::Completed,

        Commands::Create { title, content } => {
            if !app.state().can_create_note() {
                eprintln!("Note creation is disabled: the Free plan limit is reached.");
                return Outcome::Aborted;
            }
            app.open_create();
            app.set_note_form(NoteForm { title, content });
            app.submit_note().await
        }

        Commands::Edit { id, title, content } => {
            if !app.open_edit(&id) {
                eprintln!("Note {} not found", id);
                return Outcome::Failed;
            }
            let current = app
                .state()
                .editor
                .as_ref()
                .map(|editor| editor.form.clone())
                .unwrap_or_default();
            app.set_note_form(NoteForm {
                title: title.unwrap_or(current.title),
                content: content.unwrap_or(current.content),
            });
            app.submit_note().await
        }

        Commands::Delete { id, .. } => {
            if app.state().find_note(&id).is_none() {
                eprintln!("Note {} not found", id);
                return Outcome::Failed;
            }
            app.delete_note(&id).await
        }

        Commands::Upgrade { .. } => {
            let offered = matches!(
                app.view(),
                View::Dashboard(ref d) if d.plan.as_ref().map_or(false, |p| p.upgrade.is_some())
            );
            if !offered {
                eprintln!("Upgrade is only available to admins on the Free plan.");
                return Outcome::Aborted;
            }
            app.upgrade().await
        }

        Commands::Login { .. } | Commands::Config { .. } => Outcome::Aborted,
    }
}

/// Ask a yes/no question on stderr, defaulting to no
fn ask(message: &str) -> bool {
    eprint!("{} [y/N] ", message);
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("saas_notes={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
