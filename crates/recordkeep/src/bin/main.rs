//! Recordkeep CLI

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use recordkeep::*;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Recordkeep - item records with concurrent batch processing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the items
    #[arg(short, long, env = "RECORDKEEP_DATA")]
    data: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "RECORDKEEP_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration profile (development, production, high-throughput, minimal)
    #[arg(short, long, env = "RECORDKEEP_PROFILE")]
    profile: Option<String>,

    /// Output format (json, human, text)
    #[arg(short, long, default_value = "json")]
    output_format: String,

    /// Override the simulated per-item processing time
    #[arg(long)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all items
    List,
    /// Show one item
    Get { id: ItemId },
    /// Create an item
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        status: Option<String>,
    },
    /// Update fields of an existing item
    Update {
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete an item
    Delete { id: ItemId },
    /// Process every stored item concurrently
    Process {
        /// Include per-item outcomes instead of only the processed items
        #[arg(long, action = clap::ArgAction::SetTrue)]
        report: bool,
    },
    /// Create sample items
    Seed { count: usize },
    /// Show the available configuration profiles
    Profiles,
}

impl Command {
    fn operation(&self) -> &'static str {
        match self {
            Command::List => "list_items",
            Command::Get { .. } => "get_item",
            Command::Create { .. } => "create_item",
            Command::Update { .. } => "update_item",
            Command::Delete { .. } => "delete_item",
            Command::Process { .. } => "process_all",
            Command::Seed { .. } => "seed_items",
            Command::Profiles => "list_profiles",
        }
    }
}

struct App {
    label: String,
    items: ItemTools,
    batch: BatchTools,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let output_format = args
        .output_format
        .parse::<OutputFormat>()
        .map_err(anyhow::Error::msg)?;

    let LoadedConfig {
        mut config,
        warnings,
    } = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(load_config(args.config.as_deref(), args.profile.as_deref()))
        .context("Failed to load configuration")?;
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if let Some(delay) = args.delay_ms {
        config.processing_delay_ms = delay;
    }
    config.validate()?;

    init_logging(&config, output_format);
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Effective configuration: {:?}", config);

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads);
    }
    let runtime = builder.build().context("Failed to start runtime")?;

    runtime.block_on(run(args.command, config, output_format))
}

/// Logs go to stderr so stdout stays parseable
fn init_logging(config: &AppConfig, format: OutputFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.debug_mode);

    match format {
        OutputFormat::Json => builder.json().init(),
        OutputFormat::Human | OutputFormat::Text => builder.init(),
    }
}

async fn run(command: Command, config: AppConfig, format: OutputFormat) -> anyhow::Result<ExitCode> {
    log::info!(
        "Recordkeep v{} | profile: {} | data: {}",
        env!("CARGO_PKG_VERSION"),
        config.profile,
        config.data_path.display()
    );

    let store: SharedStore = Arc::new(
        JsonFileStore::open(&config.data_path)
            .await
            .with_context(|| format!("Failed to open {}", config.data_path.display()))?,
    );

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Shutdown requested, interrupting in-flight items");
            signal_token.cancel();
        }
    });

    let app = App {
        label: config.data_path.display().to_string(),
        items: ItemTools::new(store.clone()),
        batch: BatchTools::new(store, &config).with_shutdown(shutdown),
    };

    let operation = command.operation();
    let tracker = RunTracker::new();
    let (response, code) = match execute(&app, command).await {
        Ok(response) => (response.with_duration(tracker.elapsed_ms()), ExitCode::SUCCESS),
        Err(e) => {
            log::error!("{} failed: {}", operation, e);
            (
                error_response(&app.label, operation, &e).with_duration(tracker.elapsed_ms()),
                ExitCode::FAILURE,
            )
        }
    };

    println!("{}", ResponseFormatter::format(&response.to_json()?, format));
    Ok(code)
}

async fn execute(app: &App, command: Command) -> Result<StandardResponse<Value>> {
    let operation = command.operation();
    let respond = |data: Value| StandardResponse::new(&app.label, operation, data);

    let response = match command {
        Command::List => {
            let items = app.items.list().await?;
            respond(serde_json::to_value(&items)?)
                .with_count(items.len())
                .with_next_steps(&["process", "create"])
        }

        Command::Get { id } => respond(serde_json::to_value(app.items.get(id).await?)?),

        Command::Create {
            name,
            description,
            email,
            status,
        } => {
            let mut item = Item::new(name, description, email);
            if let Some(status) = status {
                item = item.with_status(status);
            }
            let (created, notes) = app.items.create_with_notes(item).await?;
            respond(serde_json::to_value(created)?)
                .with_warnings(notes)
                .with_next_steps(&["process", "list"])
        }

        Command::Update {
            id,
            name,
            description,
            email,
            status,
        } => {
            let changes = ItemChanges {
                name,
                description,
                email,
                status: status.map(ItemStatus::from),
            };
            let unchanged = changes.is_empty();
            let updated = app.items.update_fields(id, changes).await?;
            let response = respond(serde_json::to_value(updated)?);
            if unchanged {
                response.with_warning("No fields given, item left unchanged")
            } else {
                response
            }
        }

        Command::Delete { id } => {
            app.items.delete(id).await?;
            respond(json!({ "deleted": id }))
        }

        Command::Process { report } => {
            let result = app.batch.process_all_with_report().await;
            let warnings: Vec<String> = result
                .failures()
                .map(|s| format!("item {}: {}", s.id, s.reason))
                .collect();
            let count = result.processed_count();
            let run_id = result.run_id.clone();

            let data = if report {
                serde_json::to_value(&result)?
            } else {
                serde_json::to_value(result.into_items())?
            };

            let mut response = respond(data)
                .with_count(count)
                .with_warnings(warnings)
                .with_meta("run_id", json!(run_id));
            if app.batch.metrics().is_enabled() {
                response = response.with_meta("metrics", json!(app.batch.metrics().get_counters()));
            }
            response
        }

        Command::Seed { count } => {
            let created = app.items.seed(count).await?;
            respond(serde_json::to_value(&created)?)
                .with_count(created.len())
                .with_next_steps(&["list", "process"])
        }

        Command::Profiles => {
            let stored = app.items.store.count().await?;
            let profiles: Vec<Value> = ConfigProfile::ALL
                .iter()
                .map(|p| json!({ "name": p.name(), "description": p.description() }))
                .collect();
            respond(json!({
                "profiles": profiles,
                "recommended": ConfigProfile::recommend(stored).name(),
            }))
        }
    };

    Ok(response)
}
