//! Keep-alive HTTP endpoint.
//!
//! A process monitor polls `GET /` to detect that the service is up;
//! nothing else is served here.

use std::net::SocketAddr;

use axum::{Router, routing::get};
use sgweather_core::Settings;
use tracing::info;

async fn alive() -> &'static str {
    "I'm alive!"
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    info!("chat token configured ({} chars)", settings.bot_token.len());

    let app = Router::new().route("/", get(alive));
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));

    info!("keep-alive endpoint listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
