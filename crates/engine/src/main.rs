//! Sheetroll Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetroll_engine::api::{self, identity, ConnectionManager};
use sheetroll_engine::infrastructure::{
    ports::LocalRandomPort,
    random::{SeededRandom, ThreadRandom},
    random_org::RandomOrgClient,
    settings::SqliteRollConfigRepo,
};
use sheetroll_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetroll_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sheetroll Engine");

    // Load configuration
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);
    let config_db = std::env::var("CONFIG_DB").unwrap_or_else(|_| "sheetroll.db".into());
    let random_seed = std::env::var("RANDOM_SEED")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok());

    // Randomness: random.org first, local generator on failure
    let remote = Arc::new(RandomOrgClient::from_env());
    if !remote.has_credential() {
        tracing::warn!("RANDOM_ORG_KEY not set, all rolls will use the local generator");
    }
    let local: Arc<dyn LocalRandomPort> = match random_seed {
        Some(seed) => {
            tracing::info!(seed, "Local generator seeded");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom::new()),
    };

    // Platform config table
    tracing::info!("Opening config database at {}", config_db);
    let roll_config = Arc::new(SqliteRollConfigRepo::new(&config_db).await?);

    // Create connection manager
    let connections = Arc::new(ConnectionManager::new());

    // Create application
    let app = Arc::new(App::new(remote, local, roll_config, connections.clone()));

    let mut router = api::router(app, connections).layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // The sheet sends identity headers and JSON bodies, which trigger preflights.
        .allow_headers([
            HeaderName::from_static(identity::PLAYER_ID_HEADER),
            HeaderName::from_static(identity::PLAYER_ADMIN_HEADER),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
