//! LabOdc client CLI.
//!
//! Command-line shell over the client library: authenticate, inspect the
//! session, and resolve navigation for a path the way the dashboard does.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use labodc_client::auth::AuthService;
use labodc_client::config::Config;
use labodc_client::error::ClientError;
use labodc_client::http::ApiClient;
use labodc_client::session::Theme;
use labodc_client::store::{FileStore, SessionStore};
use labodc_nav::breadcrumb;
use labodc_nav::guard::{self, RouteDecision};
use labodc_nav::menu::NavRegistry;
use labodc_nav::role::{self, Role};

#[derive(Parser)]
#[command(name = "labodc", about = "LabOdc dashboard client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session.
    Login {
        #[arg(long)]
        mail: String,
        #[arg(long)]
        password: String,
    },
    /// End the session.
    Logout,
    /// Show the authenticated user.
    Whoami,
    /// Print the flattened menu for the session role.
    Menu,
    /// Guard decision and breadcrumb for a path.
    Resolve { path: String },
    /// Authenticated GET, pretty-printed.
    Get { path: String },
    /// Show or set the UI theme preference.
    Theme {
        /// New theme (`light` or `dark`); omit to show the current one.
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::open(&config.state_dir)?);
    let api = ApiClient::new(&config, Arc::clone(&store))?;
    let auth = AuthService::new(api.clone());

    match cli.command {
        Command::Login { mail, password } => {
            let user = auth.login(&mail, &password).await.map_err(friendly)?;
            println!("logged in as {} ({})", user.name, user.role);
            println!("landing page: {}", role::default_route(user.role()));
        }
        Command::Logout => {
            auth.logout().await.map_err(friendly)?;
            println!("logged out");
        }
        Command::Whoami => match auth.current_user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.mail, user.role),
            None => println!("not logged in"),
        },
        Command::Menu => {
            if !auth.is_authenticated() {
                println!("not logged in");
                return Ok(());
            }
            let registry = NavRegistry::builtin();
            match auth.role() {
                Some(role) => {
                    for entry in registry.entries(role) {
                        if entry.group_title.is_empty() {
                            println!("{:<32} {}", entry.title, entry.link);
                        } else {
                            let label = format!("{} / {}", entry.group_title, entry.title);
                            println!("{label:<32} {}", entry.link);
                        }
                    }
                }
                None => println!("unknown role; no menu available"),
            }
        }
        Command::Resolve { path } => {
            let registry = NavRegistry::builtin();
            let session_role = auth.role();
            let decision =
                guard::guard_route(auth.is_authenticated(), session_role, &allowed_roles(&path));
            match decision {
                RouteDecision::RedirectToLogin => {
                    println!("redirect: {}", guard::routes::LOGIN);
                }
                RouteDecision::RedirectToUnauthorized => {
                    println!("redirect: {}", guard::routes::UNAUTHORIZED);
                }
                RouteDecision::Allow => {
                    let entries = session_role
                        .map(|role| registry.entries(role))
                        .unwrap_or_default();
                    let crumb = breadcrumb::resolve(&entries, &path);
                    if crumb.group_title.is_empty() {
                        println!("{}", crumb.title);
                    } else {
                        println!("{} / {}", crumb.group_title, crumb.title);
                    }
                }
            }
        }
        Command::Get { path } => {
            let value: serde_json::Value = api.get(&path).await.map_err(friendly)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&value).context("failed to render response")?
            );
        }
        Command::Theme { value } => match value {
            Some(raw) => {
                let theme = Theme::parse(&raw)
                    .ok_or_else(|| anyhow::anyhow!("unknown theme {raw:?}; expected light or dark"))?;
                store.set_theme(theme)?;
                println!("theme set to {theme}");
            }
            None => match store.theme() {
                Some(theme) => println!("{theme}"),
                None => println!("light (default)"),
            },
        },
    }

    Ok(())
}

/// Roles allowed to mount a role-prefixed route namespace. Paths outside
/// the known namespaces are open to every role.
fn allowed_roles(path: &str) -> Vec<Role> {
    match path.trim_start_matches('/').split('/').next().unwrap_or("") {
        "candidate" => vec![Role::Talent, Role::TalentLeader],
        "enterprise" => vec![Role::Company],
        "mentor" => vec![Role::Mentor],
        "lab-admin" => vec![Role::LabAdmin],
        "system-admin" => vec![Role::SystemAdmin],
        _ => Role::ALL.to_vec(),
    }
}

/// Map client errors to a terminal-friendly message.
fn friendly(e: ClientError) -> anyhow::Error {
    match e {
        ClientError::SessionExpired => {
            anyhow::anyhow!("session expired; run `labodc login` to continue")
        }
        other => anyhow::anyhow!(other.message()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
