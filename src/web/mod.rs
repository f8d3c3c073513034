//! The staffdesk web site.
//!
//! ```text
//! request
//!   -> TraceLayer           (one span per request)
//!   -> attach_db            (empty per-request connection slot)
//!   -> require_login        (protected routes only)
//!   -> handler              (validate form, call the data layer, render)
//! ```

pub mod auth;
pub mod departments;
pub mod employees;
pub mod error;
pub mod forms;
pub mod index;
pub mod positions;
pub mod request_db;
pub mod session;
pub mod views;

use crate::db::db::Db;
use crate::libs::config::{Config, DEFAULT_SECRET_KEY};
use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use axum::middleware;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use session::SessionKeys;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use views::Views;

/// Shared, read-only server state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub database: Arc<PathBuf>,
    pub views: Arc<Views>,
    pub sessions: Arc<SessionKeys>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            database: Arc::new(config.database.clone()),
            views: Arc::new(Views::new()?),
            sessions: Arc::new(SessionKeys::new(&config.secret_key, config.session_minutes)?),
            config: Arc::new(config),
        })
    }
}

/// Builds the application router. The database schema is expected to be
/// migrated already.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/index", get(index::index))
        .route("/position/add", get(positions::add_page).post(positions::add))
        .route("/position/delete/{id}", get(positions::delete).post(positions::delete))
        .route("/positions", get(positions::list))
        .route("/department/add", get(departments::add_page).post(departments::add))
        .route("/department/delete/{id}", get(departments::delete).post(departments::delete))
        .route("/department/stats", get(departments::stats))
        .route("/employee/add", get(employees::add_page).post(employees::add))
        .route("/employee/delete/{id}", get(employees::delete).post(employees::delete))
        .route("/employee/update/{id}", get(employees::update_page).post(employees::update))
        .route("/employees", get(employees::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_login));

    let public = Router::new()
        .route("/", get(|| async { Redirect::to("/index") }))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(middleware::from_fn_with_state(state.clone(), request_db::attach_db))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Migrates the database and serves until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    Db::init(&config.database)?;
    tracing::info!("{}", Message::DatabaseReady(config.database.display().to_string()));
    if config.secret_key == DEFAULT_SECRET_KEY {
        msg_warning!(Message::DefaultSecretKey);
    }

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    let address = listener.local_addr()?;
    let app = router(AppState::new(config)?);

    tracing::info!("{}", Message::ServerListening(address.to_string()));
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("{}", Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
