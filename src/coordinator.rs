// Write-side orchestration across the three entity stores: allocator-issued
// ids on create, explicit patch merges on update, remaining-collection
// responses on delete.

use std::sync::Arc;

use crate::allocator::IdAllocator;
use crate::error::{AppError, AppResult};
use crate::models::{
    Author, AuthorPatch, Game, GamePatch, NewAuthor, NewGame, NewReview, Record, Review,
    ReviewRefs,
};
use crate::store::{DocumentStore, EntityStore};

#[derive(Clone)]
pub struct MutationCoordinator {
    games: EntityStore<Game>,
    authors: EntityStore<Author>,
    reviews: EntityStore<Review>,
    allocator: Arc<dyn IdAllocator>,
    /// When set, review creation rejects foreign keys with no matching
    /// record. Stricter than the stock behavior, which accepts them.
    enforce_referential_integrity: bool,
}

impl MutationCoordinator {
    pub fn new(
        games: EntityStore<Game>,
        authors: EntityStore<Author>,
        reviews: EntityStore<Review>,
        allocator: Arc<dyn IdAllocator>,
        enforce_referential_integrity: bool,
    ) -> Self {
        Self {
            games,
            authors,
            reviews,
            allocator,
            enforce_referential_integrity,
        }
    }

    fn documents(&self) -> &dyn DocumentStore {
        self.games.documents().as_ref()
    }

    pub async fn add_game(&self, input: NewGame) -> AppResult<Game> {
        let id = self
            .allocator
            .allocate(self.documents(), Game::COLLECTION)
            .await?;
        tracing::info!(id = %id, title = %input.title, "creating game");
        self.games
            .insert(Game {
                id,
                title: input.title,
                platform: input.platform,
            })
            .await
    }

    /// `None` when the id matches nothing; a missing id is reportable, not
    /// a fault.
    pub async fn update_game(&self, id: &str, patch: GamePatch) -> AppResult<Option<Game>> {
        self.games.update_partial(id, patch).await
    }

    /// Removes the game and returns the remaining collection, not the
    /// removed record. Dependent reviews keep their `game_id` (no cascade).
    pub async fn delete_game(&self, id: &str) -> AppResult<Vec<Game>> {
        if self.games.delete_by_id(id).await?.is_some() {
            tracing::info!(id = %id, "deleted game");
        }
        self.games.list_all().await
    }

    pub async fn add_author(&self, input: NewAuthor) -> AppResult<Author> {
        let id = self
            .allocator
            .allocate(self.documents(), Author::COLLECTION)
            .await?;
        tracing::info!(id = %id, name = %input.name, "creating author");
        self.authors
            .insert(Author {
                id,
                name: input.name,
                verified: input.verified,
            })
            .await
    }

    pub async fn update_author(&self, id: &str, patch: AuthorPatch) -> AppResult<Option<Author>> {
        self.authors.update_partial(id, patch).await
    }

    pub async fn delete_author(&self, id: &str) -> AppResult<Vec<Author>> {
        if self.authors.delete_by_id(id).await?.is_some() {
            tracing::info!(id = %id, "deleted author");
        }
        self.authors.list_all().await
    }

    /// The review's own fields and its foreign keys arrive separately; the
    /// keys are stored as supplied, unchecked unless strict mode is on.
    pub async fn add_review(&self, input: NewReview, refs: ReviewRefs) -> AppResult<Review> {
        if self.enforce_referential_integrity {
            self.check_refs(&refs).await?;
        }

        let id = self
            .allocator
            .allocate(self.documents(), Review::COLLECTION)
            .await?;
        tracing::info!(id = %id, game_id = %refs.game_id, author_id = %refs.author_id, "creating review");
        self.reviews
            .insert(Review {
                id,
                rating: input.rating,
                content: input.content,
                game_id: refs.game_id,
                author_id: refs.author_id,
            })
            .await
    }

    pub async fn delete_review(&self, id: &str) -> AppResult<Vec<Review>> {
        if self.reviews.delete_by_id(id).await?.is_some() {
            tracing::info!(id = %id, "deleted review");
        }
        self.reviews.list_all().await
    }

    async fn check_refs(&self, refs: &ReviewRefs) -> AppResult<()> {
        if self.games.find_by_id(&refs.game_id).await?.is_none() {
            return Err(AppError::ReferentialIntegrity(format!(
                "game_id '{}' does not reference an existing game",
                refs.game_id
            )));
        }
        if self.authors.find_by_id(&refs.author_id).await?.is_none() {
            return Err(AppError::ReferentialIntegrity(format!(
                "author_id '{}' does not reference an existing author",
                refs.author_id
            )));
        }
        Ok(())
    }
}
