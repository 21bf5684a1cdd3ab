//! EstatePulse CLI - portfolio management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List projects
//! ep-cli project list
//!
//! # Create a project (admin session)
//! ep-cli --admin project create -n "Lakeview" -l "Pune"
//!
//! # Add a unit and log an enquiry against it
//! ep-cli --admin unit add <project> --number "#A1" --type plot --base-rate 5000
//! ep-cli enquiry log <project> <unit> --customer-name "Meera" --offered-rate 4800
//!
//! # Search and export
//! ep-cli search meera
//! ep-cli export
//! ```
//!
//! The project store and defaults come from the same environment variables
//! as the server (`ESTATE_DATA_DIR`, `ESTATE_STARTUP_ROLE`, `GEMINI_API_KEY`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use estate_pulse_core::{
    EnquiryStatus, InstrumentType, NewInstrument, NewInteraction, NewProject, Rate, UserRole,
};
use estate_pulse_server::config::ServerConfig;
use estate_pulse_server::insight::{GeminiClient, InsightProvider, Unconfigured};

mod commands;

use commands::CliError;
use commands::enquiry::Target;

#[derive(Parser)]
#[command(name = "ep-cli")]
#[command(author, version, about = "EstatePulse portfolio tracker")]
struct Cli {
    /// Start the session as admin
    #[arg(long, global = true)]
    admin: bool,

    /// Directory holding the project store (overrides `ESTATE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Manage units
    Unit {
        #[command(subcommand)]
        action: UnitAction,
    },
    /// Log and update customer enquiries
    Enquiry {
        #[command(subcommand)]
        action: EnquiryAction,
    },
    /// Search projects, units and enquiries
    Search {
        /// Case-insensitive substring
        query: String,
    },
    /// Export the full CSV report
    Export {
        /// Output path, or `-` for stdout (default: dated file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Ask for an AI sales-strategy insight
    Insight {
        /// Project ID
        project: String,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List projects, newest first
    List,
    /// Show a project with its units
    Show {
        /// Project ID
        id: String,
    },
    /// Create a project (admin)
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        location: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a project and everything under it (admin)
    Delete {
        /// Project ID
        id: String,
    },
}

#[derive(Subcommand)]
enum UnitAction {
    /// List the units of a project
    List {
        /// Project ID
        project: String,
    },
    /// Add a unit to a project (admin)
    Add {
        /// Project ID
        project: String,

        #[arg(long)]
        number: String,

        /// `plot`, `flat` or `house`
        #[arg(long = "type", default_value = "plot")]
        kind: InstrumentType,

        /// INR per square foot
        #[arg(long, default_value = "0")]
        base_rate: Rate,
    },
}

#[derive(Subcommand)]
enum EnquiryAction {
    /// Log an enquiry against a unit
    Log {
        /// Project ID
        project: String,
        /// Unit ID
        unit: String,

        #[arg(long, default_value = "")]
        customer_name: String,

        #[arg(long, default_value = "")]
        customer_phone: String,

        /// Defaults to the session user
        #[arg(long, default_value = "")]
        agent_name: String,

        /// Defaults to the session user
        #[arg(long, default_value = "")]
        agent_phone: String,

        /// INR per square foot
        #[arg(long, default_value = "0")]
        offered_rate: Rate,

        /// `active`, `booked` or `sold`
        #[arg(long, default_value = "active")]
        status: EnquiryStatus,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Set an enquiry's status (admin)
    Status {
        project: String,
        unit: String,
        interaction: String,
        /// `active`, `booked` or `sold`
        status: EnquiryStatus,
    },
    /// Delete an enquiry (admin)
    Delete {
        project: String,
        unit: String,
        interaction: String,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so report output can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn insight_provider(config: &ServerConfig) -> Arc<dyn InsightProvider> {
    match config.gemini().map(GeminiClient::new) {
        Some(Ok(client)) => Arc::new(client),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Gemini client unavailable");
            Arc::new(Unconfigured)
        }
        None => Arc::new(Unconfigured),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let role = if cli.admin {
        UserRole::Admin
    } else {
        config.startup_role
    };

    let mut portfolio = commands::open_portfolio(&data_dir, role)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Project { action } => match action {
            ProjectAction::List => commands::project::list(&portfolio, &mut out)?,
            ProjectAction::Show { id } => commands::project::show(&portfolio, &id, &mut out)?,
            ProjectAction::Create {
                name,
                location,
                description,
            } => commands::project::create(
                &mut portfolio,
                NewProject {
                    name,
                    location,
                    description,
                },
                &mut out,
            )?,
            ProjectAction::Delete { id } => {
                commands::project::delete(&mut portfolio, &id, &mut out)?;
            }
        },
        Commands::Unit { action } => match action {
            UnitAction::List { project } => {
                commands::unit::list(&portfolio, &project, &mut out)?;
            }
            UnitAction::Add {
                project,
                number,
                kind,
                base_rate,
            } => commands::unit::add(
                &mut portfolio,
                &project,
                NewInstrument {
                    number,
                    kind,
                    base_rate,
                },
                &mut out,
            )?,
        },
        Commands::Enquiry { action } => match action {
            EnquiryAction::Log {
                project,
                unit,
                customer_name,
                customer_phone,
                agent_name,
                agent_phone,
                offered_rate,
                status,
                notes,
            } => commands::enquiry::log(
                &mut portfolio,
                &Target {
                    project: &project,
                    unit: &unit,
                },
                NewInteraction {
                    agent_name,
                    agent_phone,
                    customer_name,
                    customer_phone,
                    offered_rate,
                    status,
                    notes,
                },
                &mut out,
            )?,
            EnquiryAction::Status {
                project,
                unit,
                interaction,
                status,
            } => commands::enquiry::set_status(
                &mut portfolio,
                &Target {
                    project: &project,
                    unit: &unit,
                },
                &interaction,
                status,
                &mut out,
            )?,
            EnquiryAction::Delete {
                project,
                unit,
                interaction,
            } => commands::enquiry::delete(
                &mut portfolio,
                &Target {
                    project: &project,
                    unit: &unit,
                },
                &interaction,
                &mut out,
            )?,
        },
        Commands::Search { query } => commands::search::run(&portfolio, &query, &mut out)?,
        Commands::Export { output } => {
            commands::export::run(&portfolio, output.as_deref(), &mut out)?;
        }
        Commands::Insight { project } => {
            let provider = insight_provider(&config);
            commands::insight::run(&portfolio, provider.as_ref(), &project, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
