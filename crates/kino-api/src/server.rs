//! HTTP Server
//!
//! Starts the axum-based liveness server.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{ApiError, Result};
use crate::routes::routes;

/// Bind the health server port on all interfaces
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { port, source })
}

/// Serve the health routes on an already bound listener
pub async fn serve(listener: TcpListener) -> Result<()> {
    let app = routes().layer(TraceLayer::new_for_http());

    info!("🌐 Server is live on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
