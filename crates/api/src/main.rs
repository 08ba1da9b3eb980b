use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roster_observability::init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("DATABASE_URL not set; using sqlite:roster.sqlite3");
        "sqlite:roster.sqlite3".to_string()
    });
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let store = roster_store::RegistryStore::open(&database_url)
        .await
        .with_context(|| format!("failed to open registry database at {database_url}"))?;

    let app = roster_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}
