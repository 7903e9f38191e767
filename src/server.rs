// HTTP binding: GraphQL endpoint plus the small operational surface.

use async_graphql::dataloader::DataLoader;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::graphql::EdgeLoader;
use crate::seed::{seed_catalog, SeedSummary};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/api/health", get(health_check))
        .route("/api/seed", post(seed_handler))
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let mut request = req.into_inner();

    // The batching layer is attached per request so nothing is memoized
    // across requests; without it each edge field resolves on its own.
    if state.config.graph.batch_edges {
        let loader = EdgeLoader::new(
            state.games.clone(),
            state.authors.clone(),
            state.reviews.clone(),
        );
        request = request.data(DataLoader::new(loader, tokio::spawn));
    }

    state.schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "gamegraph",
    }))
}

async fn seed_handler(State(state): State<AppState>) -> AppResult<Json<SeedSummary>> {
    let summary = seed_catalog(&state.coordinator).await?;
    Ok(Json(summary))
}
