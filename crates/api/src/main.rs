use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    congregate_observability::init();

    let secret = std::env::var("CONGREGATE_JWT_SECRET")
        .context("CONGREGATE_JWT_SECRET must be set")?;
    let addr = std::env::var("CONGREGATE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = congregate_api::build_app(secret.as_bytes());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "congregate-api listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
