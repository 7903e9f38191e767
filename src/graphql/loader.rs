// Request-scoped batching for edge lookups. Pending lookups of the same
// kind within one request collapse into a single indexed pass over the
// relevant collection; resolved values are identical to the per-field path.
// The loader is attached per request by the HTTP handler, never shared.

use async_graphql::dataloader::Loader;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Author, Game, Review};
use crate::store::EntityStore;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct GameKey(pub String);

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct AuthorKey(pub String);

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ReviewsByGameKey(pub String);

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ReviewsByAuthorKey(pub String);

pub struct EdgeLoader {
    games: EntityStore<Game>,
    authors: EntityStore<Author>,
    reviews: EntityStore<Review>,
}

impl EdgeLoader {
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
}

impl Loader<GameKey> for EdgeLoader {
    type Value = Game;
    type Error = Arc<AppError>;

    async fn load(&self, keys: &[GameKey]) -> Result<HashMap<GameKey, Game>, Self::Error> {
        let wanted: HashSet<&str> = keys.iter().map(|k| k.0.as_str()).collect();
        let games = self.games.list_all().await.map_err(Arc::new)?;
        Ok(games
            .into_iter()
            .filter(|g| wanted.contains(g.id.as_str()))
            .map(|g| (GameKey(g.id.clone()), g))
            .collect())
    }
}

impl Loader<AuthorKey> for EdgeLoader {
    type Value = Author;
    type Error = Arc<AppError>;

    async fn load(&self, keys: &[AuthorKey]) -> Result<HashMap<AuthorKey, Author>, Self::Error> {
        let wanted: HashSet<&str> = keys.iter().map(|k| k.0.as_str()).collect();
        let authors = self.authors.list_all().await.map_err(Arc::new)?;
        Ok(authors
            .into_iter()
            .filter(|a| wanted.contains(a.id.as_str()))
            .map(|a| (AuthorKey(a.id.clone()), a))
            .collect())
    }
}

impl Loader<ReviewsByGameKey> for EdgeLoader {
    type Value = Vec<Review>;
    type Error = Arc<AppError>;

    async fn load(
        &self,
        keys: &[ReviewsByGameKey],
    ) -> Result<HashMap<ReviewsByGameKey, Vec<Review>>, Self::Error> {
        let wanted: HashSet<&str> = keys.iter().map(|k| k.0.as_str()).collect();
        let reviews = self.reviews.list_all().await.map_err(Arc::new)?;

        let mut grouped: HashMap<ReviewsByGameKey, Vec<Review>> = HashMap::new();
        for review in reviews {
            if wanted.contains(review.game_id.as_str()) {
                grouped
                    .entry(ReviewsByGameKey(review.game_id.clone()))
                    .or_default()
                    .push(review);
            }
        }
        Ok(grouped)
    }
}

impl Loader<ReviewsByAuthorKey> for EdgeLoader {
    type Value = Vec<Review>;
    type Error = Arc<AppError>;

    async fn load(
        &self,
        keys: &[ReviewsByAuthorKey],
    ) -> Result<HashMap<ReviewsByAuthorKey, Vec<Review>>, Self::Error> {
        let wanted: HashSet<&str> = keys.iter().map(|k| k.0.as_str()).collect();
        let reviews = self.reviews.list_all().await.map_err(Arc::new)?;

        let mut grouped: HashMap<ReviewsByAuthorKey, Vec<Review>> = HashMap::new();
        for review in reviews {
            if wanted.contains(review.author_id.as_str()) {
                grouped
                    .entry(ReviewsByAuthorKey(review.author_id.clone()))
                    .or_default()
                    .push(review);
            }
        }
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, MemoryStore};

    async fn loader_with_reviews() -> EdgeLoader {
        let documents: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let games = EntityStore::<Game>::new(Arc::clone(&documents));
        let authors = EntityStore::<Author>::new(Arc::clone(&documents));
        let reviews = EntityStore::<Review>::new(Arc::clone(&documents));

        games
            .insert(Game {
                id: "1".to_string(),
                title: "Final Fantasy 7 Remake".to_string(),
                platform: vec!["PS5".to_string()],
            })
            .await
            .unwrap();
        for (id, game_id, author_id) in [("10", "1", "1"), ("11", "1", "2"), ("12", "2", "1")] {
            reviews
                .insert(Review {
                    id: id.to_string(),
                    rating: 7,
                    content: "fine".to_string(),
                    game_id: game_id.to_string(),
                    author_id: author_id.to_string(),
                })
                .await
                .unwrap();
        }

        EdgeLoader::new(games, authors, reviews)
    }

    #[tokio::test]
    async fn one_pass_groups_reviews_per_requested_game() {
        let loader = loader_with_reviews().await;
        let keys = [
            ReviewsByGameKey("1".to_string()),
            ReviewsByGameKey("2".to_string()),
            ReviewsByGameKey("3".to_string()),
        ];

        let grouped = loader.load(&keys).await.unwrap();
        assert_eq!(grouped[&keys[0]].len(), 2);
        assert_eq!(grouped[&keys[1]].len(), 1);
        // Unmatched keys are simply absent; the resolver maps that to [].
        assert!(!grouped.contains_key(&keys[2]));
    }

    #[tokio::test]
    async fn game_lookup_omits_missing_ids() {
        let loader = loader_with_reviews().await;
        let keys = [GameKey("1".to_string()), GameKey("404".to_string())];

        let found = loader.load(&keys).await.unwrap();
        assert_eq!(found[&keys[0]].title, "Final Fantasy 7 Remake");
        assert!(!found.contains_key(&keys[1]));
    }
}
