// End-to-end schema execution against the in-memory store, covering the
// query side, the mutation shapes, dangling references, and the equivalence
// of the batched edge-resolution path.

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::Request;

use gamegraph::allocator::SequenceAllocator;
use gamegraph::coordinator::MutationCoordinator;
use gamegraph::graphql::{build_schema, EdgeLoader, GameGraphSchema, GraphContext};
use gamegraph::relationship::RelationshipResolver;
use gamegraph::seed::seed_catalog;
use gamegraph::store::{DocumentStore, EntityStore, MemoryStore};

struct Harness {
    schema: GameGraphSchema,
    coordinator: MutationCoordinator,
    context: GraphContext,
}

fn harness() -> Harness {
    let documents: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let games = EntityStore::new(Arc::clone(&documents));
    let authors = EntityStore::new(Arc::clone(&documents));
    let reviews = EntityStore::new(Arc::clone(&documents));

    let resolver = RelationshipResolver::new(games.clone(), authors.clone(), reviews.clone());
    let coordinator = MutationCoordinator::new(
        games.clone(),
        authors.clone(),
        reviews.clone(),
        Arc::new(SequenceAllocator::new()),
        false,
    );

    let context = GraphContext {
        games,
        authors,
        reviews,
        resolver,
        coordinator: coordinator.clone(),
    };
    Harness {
        schema: build_schema(context.clone()),
        coordinator,
        context,
    }
}

async fn execute(schema: &GameGraphSchema, query: &str) -> serde_json::Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

#[tokio::test]
async fn seeded_catalog_lists_all_records() {
    let h = harness();
    seed_catalog(&h.coordinator).await.unwrap();

    let data = execute(
        &h.schema,
        r#"{ games { id title platform } authors { name verified } reviews { rating } }"#,
    )
    .await;

    assert_eq!(data["games"].as_array().unwrap().len(), 5);
    assert_eq!(data["authors"].as_array().unwrap().len(), 3);
    assert_eq!(data["reviews"].as_array().unwrap().len(), 7);
    assert_eq!(data["games"][0]["id"], "1");
    assert_eq!(data["games"][0]["platform"][0], "Switch");
}

#[tokio::test]
async fn singular_lookup_of_unknown_id_is_null_not_error() {
    let h = harness();
    seed_catalog(&h.coordinator).await.unwrap();

    let data = execute(
        &h.schema,
        r#"{ game(id: "404") { title } review(id: "404") { rating } author(id: "404") { name } }"#,
    )
    .await;
    assert!(data["game"].is_null());
    assert!(data["review"].is_null());
    assert!(data["author"].is_null());
}

#[tokio::test]
async fn nested_traversal_resolves_both_edge_directions() {
    let h = harness();
    seed_catalog(&h.coordinator).await.unwrap();

    let data = execute(
        &h.schema,
        r#"{
            game(id: "1") { title reviews { rating author { name } } }
            author(id: "2") { name reviews { game { title } } }
        }"#,
    )
    .await;

    let reviews = data["game"]["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r["author"]["name"].is_string()));

    let yoshi = data["author"]["reviews"].as_array().unwrap();
    assert!(!yoshi.is_empty());
    assert!(yoshi.iter().all(|r| r["game"]["title"].is_string()));
}

#[tokio::test]
async fn spiderman_scenario_end_to_end() {
    let h = harness();

    // create Game{title:"Spiderman 2", platform:["PS5"]}
    let data = execute(
        &h.schema,
        r#"mutation { addGame(game: {title: "Spiderman 2", platform: ["PS5"]}) { id title } }"#,
    )
    .await;
    let game_id = data["addGame"]["id"].as_str().unwrap().to_string();

    // create a review pointing at it (author B never exists)
    let data = execute(
        &h.schema,
        &format!(
            r#"mutation {{ addReview(review: {{rating: 9, content: "Great"}},
                 others: {{game_id: "{}", author_id: "B"}}) {{ id rating }} }}"#,
            game_id
        ),
    )
    .await;
    let review_id = data["addReview"]["id"].as_str().unwrap().to_string();

    // Review.game resolves to the Spiderman 2 record
    let data = execute(
        &h.schema,
        &format!(r#"{{ review(id: "{}") {{ game {{ title }} }} }}"#, review_id),
    )
    .await;
    assert_eq!(data["review"]["game"]["title"], "Spiderman 2");

    // partial update leaves platform unchanged
    let data = execute(
        &h.schema,
        &format!(
            r#"mutation {{ updateGame(id: "{}", edits: {{title: "Spiderman 2 Remastered"}})
                 {{ title platform }} }}"#,
            game_id
        ),
    )
    .await;
    assert_eq!(data["updateGame"]["title"], "Spiderman 2 Remastered");
    assert_eq!(data["updateGame"]["platform"][0], "PS5");

    // delete returns the remaining collection, here empty
    let data = execute(
        &h.schema,
        &format!(r#"mutation {{ deleteGame(id: "{}") {{ id }} }}"#, game_id),
    )
    .await;
    assert_eq!(data["deleteGame"].as_array().unwrap().len(), 0);

    // The review still exists and its game_id now dangles: the non-null
    // `game` field errors for that subtree only.
    let response = h
        .schema
        .execute(format!(
            r#"{{ games {{ title }} review(id: "{}") {{ rating game {{ title }} }} }}"#,
            review_id
        ))
        .await;
    assert!(!response.errors.is_empty());
    let data = response.data.into_json().unwrap();
    // Sibling field already resolved is unaffected by the failing subtree.
    assert!(data["games"].is_array());
}

#[tokio::test]
async fn update_of_missing_id_returns_null() {
    let h = harness();
    let data = execute(
        &h.schema,
        r#"mutation { updateGame(id: "404", edits: {title: "X"}) { title } }"#,
    )
    .await;
    assert!(data["updateGame"].is_null());

    let data = execute(
        &h.schema,
        r#"mutation { updateAuthor(id: "404", edits: {verified: true}) { name } }"#,
    )
    .await;
    assert!(data["updateAuthor"].is_null());
}

#[tokio::test]
async fn deletes_return_remaining_collections_for_every_kind() {
    let h = harness();
    seed_catalog(&h.coordinator).await.unwrap();

    let data = execute(&h.schema, r#"mutation { deleteGame(id: "1") { id } }"#).await;
    assert_eq!(data["deleteGame"].as_array().unwrap().len(), 4);

    // Repeating the delete is a no-op returning the same collection.
    let data = execute(&h.schema, r#"mutation { deleteGame(id: "1") { id } }"#).await;
    assert_eq!(data["deleteGame"].as_array().unwrap().len(), 4);

    let data = execute(&h.schema, r#"mutation { deleteAuthor(id: "1") { id } }"#).await;
    assert_eq!(data["deleteAuthor"].as_array().unwrap().len(), 2);

    let data = execute(&h.schema, r#"mutation { deleteReview(id: "1") { id } }"#).await;
    assert_eq!(data["deleteReview"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn author_mutations_roundtrip() {
    let h = harness();

    let data = execute(
        &h.schema,
        r#"mutation { addAuthor(author: {name: "luigi", verified: false}) { id name verified } }"#,
    )
    .await;
    assert_eq!(data["addAuthor"]["name"], "luigi");
    assert_eq!(data["addAuthor"]["verified"], false);
    let id = data["addAuthor"]["id"].as_str().unwrap().to_string();

    let data = execute(
        &h.schema,
        &format!(
            r#"mutation {{ updateAuthor(id: "{}", edits: {{verified: true}}) {{ name verified }} }}"#,
            id
        ),
    )
    .await;
    // name untouched by the sparse edit
    assert_eq!(data["updateAuthor"]["name"], "luigi");
    assert_eq!(data["updateAuthor"]["verified"], true);
}

#[tokio::test]
async fn batched_edge_resolution_matches_the_per_field_path() {
    let h = harness();
    seed_catalog(&h.coordinator).await.unwrap();

    let query = r#"{
        games { title reviews { rating author { name } } }
        authors { name reviews { content game { title } } }
    }"#;

    let naive = h.schema.execute(query).await;
    assert!(naive.errors.is_empty(), "{:?}", naive.errors);

    let loader = EdgeLoader::new(
        h.context.games.clone(),
        h.context.authors.clone(),
        h.context.reviews.clone(),
    );
    let batched = h
        .schema
        .execute(Request::new(query).data(DataLoader::new(loader, tokio::spawn)))
        .await;
    assert!(batched.errors.is_empty(), "{:?}", batched.errors);

    assert_eq!(
        naive.data.into_json().unwrap(),
        batched.data.into_json().unwrap()
    );
}
