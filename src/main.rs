use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plan_wizard::api::{self, AppState};
use plan_wizard::client::PlannerClient;
use plan_wizard::config::{AppConfig, StoreLocation};
use plan_wizard::db::{Database, MemoryStore, ProjectStore};
use plan_wizard::generation::GenerationClient;
use plan_wizard::models::ProjectSetupInput;
use plan_wizard::wizard::{TimelineOrigin, Wizard};

#[derive(Parser)]
#[command(name = "planwiz")]
#[command(about = "Draft a software project plan: setup, features, tech stack, timeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the planner HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long, conflicts_with = "memory")]
        db: Option<PathBuf>,

        /// Keep records in memory only
        #[arg(long)]
        memory: bool,
    },
    /// Run one wizard pass and write the exported plan
    Plan {
        /// JSON file with name, description, type, industry, teamSize
        #[arg(short, long)]
        setup: PathBuf,

        /// Add a custom feature (repeatable)
        #[arg(long = "add-feature")]
        add_features: Vec<String>,

        /// Flip selection of a feature by id (repeatable)
        #[arg(long = "toggle-feature")]
        toggle_features: Vec<String>,

        /// Flip selection of a technology by id (repeatable)
        #[arg(long = "toggle-tech")]
        toggle_tech: Vec<String>,

        /// Directory for the exported plan
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Also store the plan on the running server
        #[arg(long)]
        save: bool,
    },
    /// Check server status
    Status,
}

/// Initialize tracing with output to stderr (for CLI output modes) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "plan_wizard=debug,tower_http=debug".into()),
    );

    if use_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_store(location: &StoreLocation) -> anyhow::Result<Arc<dyn ProjectStore>> {
    let db = match location {
        StoreLocation::Memory => {
            tracing::info!("Using in-memory project store");
            return Ok(Arc::new(MemoryStore::new()));
        }
        StoreLocation::Default => Database::open_default()?,
        StoreLocation::Path(path) => Database::open(path.clone())?,
    };
    db.migrate()?;
    Ok(Arc::new(db))
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let store = open_store(&config.store)?;
    let generator = GenerationClient::from_config(&config.generation)?;
    if config.generation.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; generation endpoints will fail");
    }

    let app = api::create_router(AppState::new(store, generator));

    let addr = config.bind_addr();
    tracing::info!("Starting planner server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Planner server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

struct PlanArgs {
    setup: PathBuf,
    add_features: Vec<String>,
    toggle_features: Vec<String>,
    toggle_tech: Vec<String>,
    out: PathBuf,
    save: bool,
}

async fn plan(config: AppConfig, args: PlanArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.setup)
        .with_context(|| format!("Failed to read setup file {}", args.setup.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Setup file is not valid JSON")?;
    let input = ProjectSetupInput::from_json(&value)?;

    let mut wizard = Wizard::new(GenerationClient::from_config(&config.generation)?);
    wizard.submit_setup(input)?;

    for name in &args.add_features {
        wizard.add_custom_feature(name)?;
    }
    for id in &args.toggle_features {
        wizard.toggle_feature(id)?;
    }

    if wizard.advance_from_features().await? == TimelineOrigin::Fallback {
        println!("Timeline generation unavailable, using the default timeline");
    }

    for id in &args.toggle_tech {
        wizard.toggle_tech_stack(id)?;
    }
    wizard.advance_from_tech_stack()?;

    let now = chrono::Utc::now();
    let export = wizard.export(now)?;
    std::fs::create_dir_all(&args.out)?;
    let path = args.out.join(export.file_name());
    std::fs::write(&path, export.to_bytes()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Exported plan to {}", path.display());

    if args.save {
        let client = PlannerClient::from_config(&config);
        let record = client.create_project(&wizard.to_record(now)?).await?;
        println!("Saved plan as project #{}", record.id);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Plan and status print results on stdout, so logs go to stderr
    let use_stderr = matches!(cli.command, Some(Commands::Plan { .. } | Commands::Status));
    init_tracing(use_stderr);

    let mut config = AppConfig::from_env();

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            db,
            memory,
        }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if memory {
                config.store = StoreLocation::Memory;
            } else if let Some(path) = db {
                config.store = StoreLocation::Path(path);
            }
            serve(config).await?;
        }
        Some(Commands::Plan {
            setup,
            add_features,
            toggle_features,
            toggle_tech,
            out,
            save,
        }) => {
            let args = PlanArgs {
                setup,
                add_features,
                toggle_features,
                toggle_tech,
                out,
                save,
            };
            plan(config, args).await?;
        }
        Some(Commands::Status) => {
            let client = PlannerClient::from_config(&config);
            match client.health().await {
                Ok(_) => println!("Planner server is running at {}", config.server_url),
                Err(e) => println!("Planner server is not reachable: {}", e),
            }
        }
        None => serve(config).await?,
    }

    Ok(())
}
