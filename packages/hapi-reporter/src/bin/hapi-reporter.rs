//! HAPI Reporter command line.

use clap::{Parser, Subcommand};
use hapi_reporter::contract::{ContractHandle, NearContract};
use hapi_reporter::form::{FormContext, ReportForm, View, DISMISS_AFTER};
use hapi_reporter::presenter::{print_one, print_out, JsonPresenter, Presenter, TerminalPresenter};
use hapi_reporter::session::CredentialsSession;
use hapi_reporter::{Category, Config};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "hapi-reporter", version, about = "Report and look up address categories on the HAPI contract")]
struct Cli {
    /// Print machine-readable JSON on stdout.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
struct StatusOut {
    signed_in: bool,
    account_id: Option<String>,
    contract_id: String,
    network_id: String,
}

#[derive(Serialize)]
struct CategoryOut {
    account_id: String,
    category: Option<Category>,
}

#[derive(Serialize)]
struct CategoryRow {
    category: Category,
    tier: Option<u8>,
    tier_label: Option<&'static str>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show whether a session is active and which contract is targeted.
    Status,
    /// Sign in with the configured account's credentials.
    Login,
    /// Forget the loaded key.
    Logout,
    /// Report a category for an account.
    Report {
        account_id: String,
        category: Category,
        /// Exit right after the report instead of keeping the notification up.
        #[arg(long, default_value_t = false)]
        detach: bool,
    },
    /// Look up the category stored for an account.
    Load { account_id: String },
    /// List every category with its risk tier.
    Categories,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    info!(
        network = %config.network_id,
        contract = %config.contract_id,
        node = %config.node_url,
        "Configuration loaded"
    );

    let session = Arc::new(CredentialsSession::from_env(config.clone()));
    session.restore();
    let contract = Arc::new(NearContract::new(&config, Arc::clone(&session))?);
    let contract_id = contract.contract_id().to_string();

    let json = cli.json;
    let presenter: Arc<dyn Presenter> = if json {
        Arc::new(JsonPresenter)
    } else {
        Arc::new(TerminalPresenter)
    };
    let form = ReportForm::new(FormContext {
        session,
        contract,
        presenter,
        network_id: config.network_id.clone(),
    });

    let status = |account_id: Option<String>| StatusOut {
        signed_in: account_id.is_some(),
        account_id,
        contract_id: contract_id.clone(),
        network_id: config.network_id.clone(),
    };

    match cli.command {
        Commands::Status => match form.render() {
            View::SignIn(_) if json => print_one(true, status(None), |_| String::new())?,
            View::SignIn(_) => print_sign_in_help(&config),
            View::Form(snapshot) => print_one(json, status(Some(snapshot.account_id)), |s| {
                format!(
                    "Signed in as {}\nContract:   {} ({})",
                    s.account_id.as_deref().unwrap_or_default(),
                    s.contract_id,
                    s.network_id
                )
            })?,
        },
        Commands::Login => match form.render() {
            View::SignIn(prompt) => {
                prompt.initiate_login().await?;
                let account = form.snapshot().account_id;
                print_one(json, status(Some(account)), |s| {
                    format!("Signed in as {}", s.account_id.as_deref().unwrap_or_default())
                })?;
            }
            View::Form(snapshot) => print_one(json, status(Some(snapshot.account_id)), |s| {
                format!(
                    "Already signed in as {}",
                    s.account_id.as_deref().unwrap_or_default()
                )
            })?,
        },
        Commands::Logout => {
            form.sign_out().await?;
            print_one(json, status(None), |_| "Signed out".to_string())?;
        }
        Commands::Report {
            account_id,
            category,
            detach,
        } => {
            if form.render_auth_gate().is_some() {
                if !json {
                    print_sign_in_help(&config);
                }
                return Err(hapi_reporter::Error::NotSignedIn.into());
            }
            form.submit_report(&account_id, category).await?;
            if !detach && !json {
                tokio::select! {
                    _ = tokio::time::sleep(DISMISS_AFTER) => {}
                    _ = tokio::signal::ctrl_c() => info!("Interrupted"),
                }
            }
            form.close();
        }
        Commands::Load { account_id } => {
            let category = form.load_category(&account_id).await?;
            if json {
                print_one(true, CategoryOut { account_id, category }, |_| String::new())?;
            }
        }
        Commands::Categories => {
            let rows: Vec<CategoryRow> = Category::ALL
                .into_iter()
                .map(|category| CategoryRow {
                    category,
                    tier: category.tier().map(|t| t as u8),
                    tier_label: category.tier().map(|t| t.label()),
                })
                .collect();
            print_out(json, &rows, |row| match row.category.tier() {
                Some(tier) => format!("{:<20} {tier}", row.category.as_str()),
                None => format!("{:<20} -", row.category.as_str()),
            })?;
        }
    }

    Ok(())
}

fn print_sign_in_help(config: &Config) {
    let path = config.credentials_path(config.account_id.as_deref().unwrap_or("<account>"));
    println!("Not signed in.");
    println!(
        "Set HAPI_ACCOUNT_ID and place a near-cli key at {}, or provide HAPI_KEYS_JSON, then run `hapi-reporter login`.",
        path.display()
    );
}
