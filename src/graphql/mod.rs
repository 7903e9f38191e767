// The resolver map handed to the GraphQL engine. The engine owns parsing,
// validation, and serialization; these modules only produce field values.

pub mod inputs;
pub mod loader;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

use crate::coordinator::MutationCoordinator;
use crate::models::{Author, Game, Review};
use crate::relationship::RelationshipResolver;
use crate::store::EntityStore;

pub use loader::EdgeLoader;
pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// Everything field resolvers need, constructed once and carried in schema
/// context data. No ambient singleton.
#[derive(Clone)]
pub struct GraphContext {
    pub games: EntityStore<Game>,
    pub authors: EntityStore<Author>,
    pub reviews: EntityStore<Review>,
    pub resolver: RelationshipResolver,
    pub coordinator: MutationCoordinator,
}

pub type GameGraphSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(context: GraphContext) -> GameGraphSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(context)
        .finish()
}
