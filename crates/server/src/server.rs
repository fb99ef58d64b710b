use axum::{Json, Router, extract::State, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::{customers, spending, transactions, types::status::SeedStatus};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn health() -> Json<&'static str> {
    Json("OK")
}

async fn seed_status(State(state): State<ServerState>) -> Json<SeedStatus> {
    Json(state.engine.seed_status().clone())
}

fn router(state: ServerState) -> Router {
    let customer_routes = Router::new()
        .route("/profile", get(customers::profile))
        .route("/filters", get(customers::filters))
        .route("/goals", get(customers::goals))
        .route("/spending/trends", get(customers::trends))
        .route("/spending/summary", get(spending::summary))
        .route("/spending/categories", get(spending::categories))
        .route("/transactions", get(transactions::list));

    Router::new()
        .route("/health", get(health))
        .route("/debug/seed-status", get(seed_status))
        .nest("/api/customers/{customer_id}", customer_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The full application router over `engine`, without binding a socket.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
