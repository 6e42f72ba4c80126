use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use hearing_lists::config::AppConfig;
use hearing_lists::error::AppError;
use hearing_lists::publications::{
    locate_cases, publication_router, InMemoryArtefactRegistry, InMemorySearchStore,
    ListTypeCatalog, LocatedCase, PublicationService, SearchFieldConfig,
};
use hearing_lists::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Hearing Lists",
    about = "Publish court and tribunal hearing lists and inspect case search extraction",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the case search extraction without running the service
    Search {
        #[command(subcommand)]
        command: SearchCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum SearchCommand {
    /// Run the case locator over a hearing-list payload file
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// JSON payload file to scan
    #[arg(long)]
    payload: PathBuf,
    /// Payload key holding the case number
    #[arg(long)]
    case_number_field: Option<String>,
    /// Payload key holding the case name
    #[arg(long)]
    case_name_field: Option<String>,
    /// Emit the located cases as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Search {
            command: SearchCommand::Extract(args),
        } => run_search_extract(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let catalog = Arc::new(ListTypeCatalog::standard());
    let registry = Arc::new(InMemoryArtefactRegistry::default());
    let store = Arc::new(InMemorySearchStore::default());
    let service = Arc::new(PublicationService::new(
        registry,
        catalog.registry(),
        catalog,
        store,
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(publication_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hearing list service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_search_extract(args: ExtractArgs) -> Result<(), AppError> {
    let ExtractArgs {
        payload,
        case_number_field,
        case_name_field,
        json,
    } = args;

    let raw = std::fs::read_to_string(&payload)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let fields = SearchFieldConfig::new(case_number_field.as_deref(), case_name_field.as_deref());

    let cases = locate_cases(&value, &fields);

    if json {
        println!("{}", serde_json::to_string_pretty(&cases)?);
    } else {
        render_located_cases(&payload, &cases);
    }

    Ok(())
}

fn render_located_cases(payload: &std::path::Path, cases: &[LocatedCase]) {
    println!("Case search extraction for {}", payload.display());

    if cases.is_empty() {
        println!("No case records located.");
        return;
    }

    println!("Located {} case record(s):", cases.len());
    for (index, case) in cases.iter().enumerate() {
        println!(
            "{:>4}. number: {} | name: {}",
            index + 1,
            case.case_number.as_deref().unwrap_or("-"),
            case.case_name.as_deref().unwrap_or("-")
        );
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
