use tokio::net::TcpListener;

use gamegraph::{app_state::AppState, config::Config, server::build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let app_state = AppState::new(config.clone()).await?;
    let app = build_router(app_state);

    let addr = config.server_address();
    tracing::info!("gamegraph server starting on http://{}", addr);
    tracing::info!("GraphiQL available at http://{}/graphql", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
