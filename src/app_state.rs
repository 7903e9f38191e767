use std::sync::Arc;

use crate::allocator::{IdAllocator, RandomAllocator, SequenceAllocator};
use crate::config::{AllocatorPolicy, Config};
use crate::coordinator::MutationCoordinator;
use crate::graphql::{build_schema, GameGraphSchema, GraphContext};
use crate::models::{Author, Game, Review};
use crate::relationship::RelationshipResolver;
use crate::store::{DocumentStore, EntityStore, MemoryStore, SqliteStore};

#[derive(Clone)]
pub struct AppState {
    pub schema: GameGraphSchema,
    pub games: EntityStore<Game>,
    pub authors: EntityStore<Author>,
    pub reviews: EntityStore<Review>,
    pub coordinator: MutationCoordinator,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let documents: Arc<dyn DocumentStore> = if config.database.url == "memory" {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(SqliteStore::connect(&config.database.url).await?)
        };

        let allocator: Arc<dyn IdAllocator> = match config.graph.allocator {
            AllocatorPolicy::Sequence => Arc::new(SequenceAllocator::new()),
            AllocatorPolicy::Random => Arc::new(RandomAllocator::default()),
        };

        let games = EntityStore::<Game>::new(Arc::clone(&documents));
        let authors = EntityStore::<Author>::new(Arc::clone(&documents));
        let reviews = EntityStore::<Review>::new(Arc::clone(&documents));

        let resolver =
            RelationshipResolver::new(games.clone(), authors.clone(), reviews.clone());
        let coordinator = MutationCoordinator::new(
            games.clone(),
            authors.clone(),
            reviews.clone(),
            allocator,
            config.graph.enforce_referential_integrity,
        );

        let schema = build_schema(GraphContext {
            games: games.clone(),
            authors: authors.clone(),
            reviews: reviews.clone(),
            resolver,
            coordinator: coordinator.clone(),
        });

        Ok(Self {
            schema,
            games,
            authors,
            reviews,
            coordinator,
            config,
        })
    }
}
