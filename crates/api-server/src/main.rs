use std::net::SocketAddr;
use std::sync::Arc;

use api_server::http::{self, AppState};
use shared::config::ServerConfig;
use shared::llm::OpenRouterGateway;
use shared::session::InMemorySessionStore;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api_server=debug,axum=info".to_string()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {err}");
            std::process::exit(1);
        }
    };

    let gateway = match OpenRouterGateway::new(config.openrouter.clone()) {
        Ok(gateway) => gateway,
        Err(err) => {
            error!("failed to build chat gateway: {err}");
            std::process::exit(1);
        }
    };

    let app = http::build_router(AppState {
        store: Arc::new(InMemorySessionStore::new()),
        gateway: Arc::new(gateway),
        session_secret: config.session_secret,
        session_ttl_seconds: config.session_ttl_seconds,
    });

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .unwrap_or_else(|_| "127.0.0.1:8080".parse().expect("valid default bind addr"));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind should succeed");

    info!(
        "api server listening on {}",
        listener.local_addr().unwrap_or(addr)
    );
    axum::serve(listener, app).await.expect("server should run");
}
