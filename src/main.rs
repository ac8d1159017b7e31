use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use admissions_advisor::admissions::catalog::{load_rows_from_path, AdmissionCatalog};
use admissions_advisor::admissions::{conversation_router, AdmissionService, ConversationId};
use admissions_advisor::config::AppConfig;
use admissions_advisor::error::AppError;
use admissions_advisor::telemetry;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Admissions Advisor",
    about = "Run the admissions eligibility advisor as an HTTP service or a local chat",
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
    /// Run one conversation interactively on stdin/stdout
    Chat(ChatArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Override the configured admission-rules CSV path
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct ChatArgs {
    /// Override the configured admission-rules CSV path
    #[arg(long)]
    rules: Option<PathBuf>,
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
        Command::Chat(args) => run_chat(args),
    }
}

fn load_catalog(path: &Path) -> Result<AdmissionCatalog, AppError> {
    let rows = load_rows_from_path(path)?;
    let catalog = AdmissionCatalog::from_rows(&rows)?;
    info!(
        path = %path.display(),
        institutions = catalog.institution_names().len(),
        "admission catalog loaded"
    );
    Ok(catalog)
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(rules) = args.rules.take() {
        config.catalog.rules_path = rules;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&config.catalog.rules_path)?;
    let service = Arc::new(AdmissionService::new(Arc::new(catalog)));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(conversation_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_chat(mut args: ChatArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(rules) = args.rules.take() {
        config.catalog.rules_path = rules;
    }

    let catalog = load_catalog(&config.catalog.rules_path)?;
    let service = AdmissionService::new(Arc::new(catalog));
    let conversation = ConversationId("local".to_string());

    let opening = service.handle_message(&conversation, "");
    println!("{}", opening.message);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let turn = service.handle_message(&conversation, &line);
        println!("{}", turn.message);
        if turn.report.is_some() {
            break;
        }
        io::stdout().flush()?;
    }

    Ok(())
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
