use std::net::SocketAddr;
use std::sync::Arc;
use taskman_server::api::{self, AppState};
use taskman_server::config::Settings;
use taskman_server::repo::TaskRepository;
use taskman_server::store::DocumentStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Tracing is tunable via RUST_LOG; default keeps request and error
    // logs visible.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("taskman_server=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // ── Configuration (missing required vars is fatal) ─────────
    let settings = Settings::from_env().expect("Incomplete environment configuration");

    // ── Open the task collection ───────────────────────────────
    let store = DocumentStore::open(&settings.database_path, &settings.collection_name)
        .expect("Failed to open task store");
    tracing::info!(
        path = %settings.database_path,
        collection = %settings.collection_name,
        "task store opened"
    );

    let state = Arc::new(AppState {
        repo: TaskRepository::new(store),
    });

    // ── Start ──────────────────────────────────────────────────
    let app = api::router(state);
    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .expect("BIND_ADDR is not a valid socket address");
    tracing::info!(%addr, "Task Manager API listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
