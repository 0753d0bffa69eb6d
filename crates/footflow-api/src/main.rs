use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use footflow_core::Explorer;
use footflow_store::CsvFeedbackLog;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use footflow_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footflow_api=info,footflow_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    tracing::info!(
        port = config.port,
        data_dir = %config.core.data_dir.value.display(),
        feedback_path = %config.core.feedback_path.value.display(),
        "Starting Footflow API server"
    );

    let explorer = Explorer::new(config.core.resolver(), config.core.map_settings());
    let feedback_log = Arc::new(CsvFeedbackLog::new(config.core.feedback_path.value.clone()));
    let state = Arc::new(AppState::new(explorer, feedback_log));

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
