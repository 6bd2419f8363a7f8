//! The `mnemo-server` binary.
//!
//! Environment:
//!   PORT          listen port (default 3001)
//!   FRONTEND_URL  invite-link base; falls back to each connection's
//!                 Origin header when unset
//!   RUST_LOG      tracing filter (default `info`)

use mnemo::{MnemoServerBuilder, ServerError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let mut builder = MnemoServerBuilder::new().bind(&format!("0.0.0.0:{port}"));
    if let Ok(url) = std::env::var("FRONTEND_URL") {
        builder = builder.frontend_url(&url);
    }

    let server = builder.build().await?;
    tracing::info!(%port, "mnemo server listening");
    server.run().await
}
