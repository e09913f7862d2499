//! Serve command handler.

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::{build_hasher, open_store};
use crate::cli::ServeArgs;
use crate::cli::config::Config;
use crate::web::{AppState, SessionSettings, router};

/// How often expired sessions are purged from the database.
const SESSION_PURGE_PERIOD: Duration = Duration::from_secs(60);

pub fn handle_serve(args: &ServeArgs, db_path: &Path, config: &Config) -> Result<()> {
    let store = open_store(db_path)?;
    let hasher = build_hasher(&config.password_hashing)?;
    let state = AppState::new(store, Arc::new(hasher));
    let sessions = SessionSettings {
        secure: config.secure_cookies,
        days: config.session_days(),
    };
    let session_store = state.session_store();
    let app = router(state, sessions);
    let bind = config.bind_addr(args.bind.as_deref());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind)
            .await
            .with_context(|| format!("failed to bind {}", bind))?;
        info!("database: {}", db_path.display());
        info!("listening on http://{}", listener.local_addr()?);

        let purge = tokio::spawn(session_store.continuously_delete_expired(SESSION_PURGE_PERIOD));

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error");
        purge.abort();
        served
    })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            warn!("cannot listen for ctrl-c, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
