use async_graphql::{Context, Object, Result, ID};

use super::inputs::{
    AddAuthorInput, AddGameInput, AddReviewInput, EditAuthorInput, EditGameInput,
    OthersReviewInput,
};
use super::GraphContext;
use crate::models::{Author, Game, Review};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_game(&self, ctx: &Context<'_>, game: AddGameInput) -> Result<Option<Game>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(Some(graph.coordinator.add_game(game.into()).await?))
    }

    /// `null` when the id matches no game; supplied fields merge shallowly.
    async fn update_game(
        &self,
        ctx: &Context<'_>,
        id: ID,
        edits: EditGameInput,
    ) -> Result<Option<Game>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(graph
            .coordinator
            .update_game(id.as_str(), edits.into())
            .await?)
    }

    /// Returns the remaining games, not the deleted record. Deleting an
    /// unknown id is a no-op that still returns the collection.
    async fn delete_game(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Vec<Option<Game>>>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        let remaining = graph.coordinator.delete_game(id.as_str()).await?;
        Ok(Some(remaining.into_iter().map(Some).collect()))
    }

    async fn add_review(
        &self,
        ctx: &Context<'_>,
        review: AddReviewInput,
        others: OthersReviewInput,
    ) -> Result<Option<Review>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(Some(
            graph
                .coordinator
                .add_review(review.into(), others.into())
                .await?,
        ))
    }

    async fn delete_review(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<Vec<Option<Review>>>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        let remaining = graph.coordinator.delete_review(id.as_str()).await?;
        Ok(Some(remaining.into_iter().map(Some).collect()))
    }

    async fn add_author(
        &self,
        ctx: &Context<'_>,
        author: AddAuthorInput,
    ) -> Result<Option<Author>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(Some(graph.coordinator.add_author(author.into()).await?))
    }

    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
        edits: EditAuthorInput,
    ) -> Result<Option<Author>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(graph
            .coordinator
            .update_author(id.as_str(), edits.into())
            .await?)
    }

    async fn delete_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<Vec<Option<Author>>>> {
        let graph = ctx.data_unchecked::<GraphContext>();
        let remaining = graph.coordinator.delete_author(id.as_str()).await?;
        Ok(Some(remaining.into_iter().map(Some).collect()))
    }
}
