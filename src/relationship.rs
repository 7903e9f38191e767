// Derived graph edges. None of these are stored: each edge is computed from
// the flat foreign-key fields when the corresponding GraphQL field is
// requested, and recomputed on every request. A request listing N games with
// their reviews therefore performs N review scans; the request-scoped
// dataloader in `graphql::loader` is the opt-in batched alternative.

use crate::error::AppResult;
use crate::models::{Author, Game, Review};
use crate::store::EntityStore;

#[derive(Clone)]
pub struct RelationshipResolver {
    games: EntityStore<Game>,
    authors: EntityStore<Author>,
    reviews: EntityStore<Review>,
}

impl RelationshipResolver {
    pub fn new(
        games: EntityStore<Game>,
        authors: EntityStore<Author>,
        reviews: EntityStore<Review>,
    ) -> Self {
        Self {
            games,
            authors,
            reviews,
        }
    }

    /// All reviews whose `game_id` matches. Full collection scan.
    pub async fn reviews_for_game(&self, game_id: &str) -> AppResult<Vec<Review>> {
        let reviews = self.reviews.list_all().await?;
        Ok(reviews.into_iter().filter(|r| r.game_id == game_id).collect())
    }

    /// All reviews whose `author_id` matches. Full collection scan.
    pub async fn reviews_for_author(&self, author_id: &str) -> AppResult<Vec<Review>> {
        let reviews = self.reviews.list_all().await?;
        Ok(reviews
            .into_iter()
            .filter(|r| r.author_id == author_id)
            .collect())
    }

    /// The game a review points at; `None` when the foreign key dangles.
    pub async fn game_of_review(&self, review: &Review) -> AppResult<Option<Game>> {
        self.games.find_by_id(&review.game_id).await
    }

    /// The author a review points at; `None` when the foreign key dangles.
    pub async fn author_of_review(&self, review: &Review) -> AppResult<Option<Author>> {
        self.authors.find_by_id(&review.author_id).await
    }
}
