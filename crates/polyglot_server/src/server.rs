//! Listener lifecycle.

use crate::{AppState, create_router};
use polyglot_error::{ServerError, ServerErrorKind};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Bind the listening socket.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Bind`] if the address is unavailable.
#[instrument]
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", addr, e))))?;
    info!(%addr, "Listening");
    Ok(listener)
}

/// Serve the relay until `shutdown` resolves.
///
/// When `shutdown` resolves the state's cancellation token is cancelled, so
/// in-flight fallback runs stop at their next suspension point and answer 503
/// before the listener closes.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Serve`] if the accept loop fails.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let token = state.shutdown().clone();
    let router = create_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown requested, cancelling in-flight requests");
            token.cancel();
        })
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C; shut down by terminating the process");
        std::future::pending::<()>().await;
    }
}
