// SWIFT Directory - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use swift_directory::api::{router, AppState, API_PREFIX};
use swift_directory::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("swift_directory=info,tower_http=info")),
        )
        .init();

    println!("🌐 SWIFT Directory - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::from_env();
    let state = AppState::from_config(&config)?;
    info!(
        backend = ?config.store_backend,
        db = %config.db_path.display(),
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        "store opened"
    );

    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}{}/swift-codes/{{swiftCode}}", addr, API_PREFIX);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
