//! Entrepreneurial DNA assessment server.

use std::sync::Arc;

use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use entrepreneurial_dna::adapters::http::{app_router, AssessmentAppState};
use entrepreneurial_dna::adapters::postgres::{connect_pool, run_migrations};
use entrepreneurial_dna::adapters::{InMemoryResultStore, PostgresResultStore, SystemClock};
use entrepreneurial_dna::application::AssessmentService;
use entrepreneurial_dna::config::{AppConfig, ConfigError, ValidationError};
use entrepreneurial_dna::domain::foundation::DomainError;
use entrepreneurial_dna::ports::AssessmentResultStore;
use entrepreneurial_dna::telemetry::{self, TelemetryError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("result store: {0}")]
    Store(#[from] DomainError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.server)?;

    let store = build_store(&config).await?;
    let service = AssessmentService::new(store, Arc::new(SystemClock))
        .with_scoring_model(config.assessment.scoring_model()?)
        .with_retake_policy(config.assessment.retake_policy()?)
        .with_retry_policy(config.assessment.retry_policy());

    let app = app_router(AssessmentAppState::new(service)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(environment = ?config.server.environment, %addr, "entrepreneurial dna service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn AssessmentResultStore>, StartupError> {
    let Some(database) = &config.database else {
        info!("no database configured, keeping results in memory");
        return Ok(Arc::new(InMemoryResultStore::new()));
    };

    let pool = connect_pool(database).await?;
    if database.run_migrations {
        run_migrations(&pool).await?;
        info!("database migrations applied");
    }
    info!(url = %database.redacted_url(), "using postgres result store");
    Ok(Arc::new(PostgresResultStore::new(pool)))
}
