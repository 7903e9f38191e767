use async_graphql::{Context, Object, Result, ID};

use super::GraphContext;
use crate::models::{Author, Game, Review};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn games(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Game>>>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        let games = graph.games.list_all().await?;
        Ok(Some(games.into_iter().map(Some).collect()))
    }

    async fn reviews(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Review>>>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        let reviews = graph.reviews.list_all().await?;
        Ok(Some(reviews.into_iter().map(Some).collect()))
    }

    async fn authors(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Author>>>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        let authors = graph.authors.list_all().await?;
        Ok(Some(authors.into_iter().map(Some).collect()))
    }

    /// `null` for an unknown id, never an error.
    async fn game(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Game>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(graph.games.find_by_id(id.as_str()).await?)
    }

    async fn review(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Review>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(graph.reviews.find_by_id(id.as_str()).await?)
    }

    async fn author(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Author>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(graph.authors.find_by_id(id.as_str()).await?)
    }
}
