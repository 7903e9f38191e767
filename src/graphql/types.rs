// Field resolvers for the three record kinds. Scalar fields read straight
// off the record; edge fields go through the relationship resolver, or
// through the request-scoped dataloader when one is attached.
//
// `Review.game` and `Review.author` are non-null in the schema, so a
// dangling foreign key surfaces as a field error scoped to that field. The
// relationship layer itself reports absence, never an error.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Error, Object, Result, ID};

use super::loader::{AuthorKey, EdgeLoader, GameKey, ReviewsByAuthorKey, ReviewsByGameKey};
use super::GraphContext;
use crate::models::{Author, Game, Review};

#[Object]
impl Game {
    async fn id(&self) -> ID {
        ID::from(self.id.as_str())
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn platform(&self) -> &[String] {
        &self.platform
    }

    async fn reviews(&self, ctx: &Context<'_>) -> Result<Option<Vec<Review>>> {
        if let Some(loader) = ctx.data_opt::<DataLoader<EdgeLoader>>() {
            let reviews = loader
                .load_one(ReviewsByGameKey(self.id.clone()))
                .await
                .map_err(|e| Error::new(e.to_string()))?;
            return Ok(Some(reviews.unwrap_or_default()));
        }

        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(Some(graph.resolver.reviews_for_game(&self.id).await?))
    }
}

#[Object]
impl Author {
    async fn id(&self) -> ID {
        ID::from(self.id.as_str())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn verified(&self) -> bool {
        self.verified
    }

    async fn reviews(&self, ctx: &Context<'_>) -> Result<Option<Vec<Review>>> {
        if let Some(loader) = ctx.data_opt::<DataLoader<EdgeLoader>>() {
            let reviews = loader
                .load_one(ReviewsByAuthorKey(self.id.clone()))
                .await
                .map_err(|e| Error::new(e.to_string()))?;
            return Ok(Some(reviews.unwrap_or_default()));
        }

        let graph = ctx.data_unchecked::<GraphContext>();
        Ok(Some(graph.resolver.reviews_for_author(&self.id).await?))
    }
}

#[Object]
impl Review {
    async fn id(&self) -> ID {
        ID::from(self.id.as_str())
    }

    async fn rating(&self) -> i32 {
        self.rating
    }

    async fn content(&self) -> &str {
        &self.content
    }

    async fn game(&self, ctx: &Context<'_>) -> Result<Game> {
        let game = if let Some(loader) = ctx.data_opt::<DataLoader<EdgeLoader>>() {
            loader
                .load_one(GameKey(self.game_id.clone()))
                .await
                .map_err(|e| Error::new(e.to_string()))?
        } else {
            let graph = ctx.data_unchecked::<GraphContext>();
            graph.resolver.game_of_review(self).await?
        };

        game.ok_or_else(|| {
            Error::new(format!(
                "review {} references game {} which does not exist",
                self.id, self.game_id
            ))
        })
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Author> {
        let author = if let Some(loader) = ctx.data_opt::<DataLoader<EdgeLoader>>() {
            loader
                .load_one(AuthorKey(self.author_id.clone()))
                .await
                .map_err(|e| Error::new(e.to_string()))?
        } else {
            let graph = ctx.data_unchecked::<GraphContext>();
            graph.resolver.author_of_review(self).await?
        };

        author.ok_or_else(|| {
            Error::new(format!(
                "review {} references author {} which does not exist",
                self.id, self.author_id
            ))
        })
    }
}
