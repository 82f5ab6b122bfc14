use mock_server::{app, app_with_token, Fixture};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let fixture = match std::env::var("DASHBOARD_FIXTURE") {
        Ok(path) => Fixture::load(&path)?,
        Err(_) => Fixture::default(),
    };
    let router = match std::env::var("DASHBOARD_ACCESS_TOKEN") {
        Ok(token) if !token.is_empty() => app_with_token(fixture, &token),
        _ => app(fixture),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    mock_server::run(listener, router).await
}
