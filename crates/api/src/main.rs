use std::sync::Arc;

use anyhow::Context;
use screenplay_db::DbPool;
use screenplay_llm::{ChatCompleter, LlmConfig, OpenAiApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use screenplay_api::config::ServerConfig;
use screenplay_api::router::build_app_router;
use screenplay_api::state::AppState;

const DEFAULT_LOG_FILTER: &str =
    "screenplay_api=debug,screenplay_llm=debug,screenplay_db=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let addr = config.bind_addr().context("Invalid HOST address")?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = open_database(&database_url).await?;
    let llm = build_completer(&config.llm)?;

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        llm,
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, timeout_secs = config.request_timeout_secs, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

/// `RUST_LOG` wins over the built-in filter when set.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify and migrate. Any failure aborts startup.
async fn open_database(url: &str) -> anyhow::Result<DbPool> {
    let pool = screenplay_db::create_pool(url)
        .await
        .context("Failed to connect to database")?;

    screenplay_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    screenplay_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database ready");
    Ok(pool)
}

/// The server still starts without a key; the stage endpoints then answer 500.
fn build_completer(config: &LlmConfig) -> anyhow::Result<Option<Arc<dyn ChatCompleter>>> {
    let Some(api) = OpenAiApi::from_config(config).context("Failed to build LLM client")? else {
        tracing::warn!("OPENAI_API_KEY not set; stage endpoints are disabled");
        return Ok(None);
    };

    tracing::info!(base_url = %config.base_url, model = %config.model, "LLM client ready");
    let llm: Arc<dyn ChatCompleter> = Arc::new(api);
    Ok(Some(llm))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, draining connections"),
        () = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
