//! HTTP front end for the jokes service.
//!
//! Thin axum layer over `jokes_core`: it extracts parameters, runs one
//! service call per request and shapes the JSON reply. Business rules live in
//! the core crate.

use std::time::Instant;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use jokes_core::db::{DbError, open_db};
use log::{error, info};
use thiserror::Error;
use tokio::{net::TcpListener, signal::ctrl_c};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{
    attach_joke, create_category, create_joke, get_joke, health, jokes_for_category,
    list_categories, list_jokes, random_joke, random_joke_for_category, vote,
};
use state::AppState;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to open database: {0}")]
    Database(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jokes", get(list_jokes).post(create_joke))
        .route("/jokes/random", get(random_joke))
        .route("/jokes/random/{category}", get(random_joke_for_category))
        .route("/jokes/categories/{category}", get(jokes_for_category))
        .route("/jokes/{id}", get(get_joke).post(attach_joke))
        .route("/jokes/{id}/{vote}", get(vote))
        .route("/categories", get(list_categories).post(create_category))
        .route("/health", get(health))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Opens the store, binds the listener and serves until a shutdown signal.
pub async fn start_server(config: Config) -> Result<(), ServerError> {
    info!("event=server_init module=server status=start db_path={}", config.db_path);
    let state = AppState::new(open_db(&config.db_path)?);

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("event=server_listen module=server status=ok address=http://{address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    info!(
        "event=http_request module=server method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("event=shutdown module=server status=ok signal=ctrl_c"),
            Err(err) => error!("event=shutdown module=server status=error error={err}"),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown module=server status=ok signal=terminate");
            }
            Err(err) => {
                error!("event=shutdown module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
