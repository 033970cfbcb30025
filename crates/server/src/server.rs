use axum::{
    Router,
    routing::{delete, get, post},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{expenses, export, vehicles};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/vehicles", get(vehicles::list))
        .route("/vehicle", post(vehicles::create))
        .route("/vehicle/{id}", delete(vehicles::remove))
        .route("/vehicle/margin", post(vehicles::update_margin))
        .route("/vehicle/sell", post(vehicles::sell))
        .route("/expense", post(expenses::create))
        .route("/expense/update", post(expenses::update))
        .route("/expense/{id}", delete(expenses::remove))
        .route("/export", get(export::export))
        .with_state(state)
}

pub async fn run(engine: Engine, port: u16) {
    let listener = match tokio::net::TcpListener::bind(("127.0.0.1", port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
