use helpdesk_mock::{AppState, Config, router};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk_mock=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let state = if config.seed {
        AppState::seeded()
    } else {
        AppState::new()
    };

    let app = router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("helpdesk-mock listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
