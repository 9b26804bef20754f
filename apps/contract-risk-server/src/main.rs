//! Contract Risk Server
//!
//! HTTP front end for the freelance contract risk engine. Accepts extracted
//! contract text and returns the scored analysis with statutory citations,
//! plain-language explanations and fair-practice deviations.
//!
//! - Rate limiting via tower-governor
//! - Knowledge file reloaded per request (see `CONTRACT_KNOWLEDGE_PATH`)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use contract_risk_engine::{ContractAnalyzer, EngineConfig, Explainer, TemplateExplainer};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod position;

use api::{handle_analyze, handle_health, handle_list_patterns};

/// Command-line arguments for the contract risk server
#[derive(Parser, Debug)]
#[command(name = "contract-risk-server")]
#[command(about = "Freelance contract risk analysis API")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// JSON knowledge file (overrides CONTRACT_KNOWLEDGE_PATH)
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ContractAnalyzer>,
    pub explainer: Arc<dyn Explainer>,
    pub config: Arc<EngineConfig>,
}

impl AppState {
    pub fn new(config: EngineConfig, explainer: Arc<dyn Explainer>) -> Self {
        Self {
            analyzer: Arc::new(ContractAnalyzer::from_config(&config)),
            explainer,
            config: Arc::new(config),
        }
    }
}

/// Worst-case growth of one text byte once JSON-escaped (`\u00XX`)
const JSON_ESCAPE_FACTOR: usize = 6;

/// Room for the request fields other than `text`
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest request body accepted for a given text limit
pub fn body_limit(max_text_bytes: usize) -> usize {
    max_text_bytes
        .saturating_mul(JSON_ESCAPE_FACTOR)
        .saturating_add(BODY_OVERHEAD_BYTES)
}

/// Routes without the per-IP rate limiter, which needs connection info
pub fn app(state: AppState) -> Router {
    let limit = body_limit(state.config.max_text_bytes);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/patterns", get(handle_list_patterns))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contract risk server on {}:{}", args.host, args.port);

    let mut config = EngineConfig::from_env()?;
    if let Some(path) = args.knowledge {
        config.knowledge_path = Some(path);
    }

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit.saturating_mul(2))
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    let max_text_bytes = config.max_text_bytes;
    let default_language = config.default_language;
    let state = AppState::new(config, Arc::new(TemplateExplainer::new()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = app(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!(
        "Max text size: {} bytes, default language: {}",
        max_text_bytes, default_language
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
