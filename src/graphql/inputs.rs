// Input objects, field-named to match the published schema (snake_case
// foreign keys included), converting into the domain input/patch types.

use async_graphql::{InputObject, ID};

use crate::models::{
    AuthorPatch, GamePatch, NewAuthor, NewGame, NewReview, ReviewRefs,
};

#[derive(InputObject)]
pub struct AddGameInput {
    pub title: String,
    pub platform: Vec<String>,
}

#[derive(InputObject)]
pub struct EditGameInput {
    pub title: Option<String>,
    pub platform: Option<Vec<String>>,
}

#[derive(InputObject)]
pub struct AddAuthorInput {
    pub name: String,
    pub verified: bool,
}

#[derive(InputObject)]
pub struct EditAuthorInput {
    pub name: Option<String>,
    pub verified: Option<bool>,
}

#[derive(InputObject)]
pub struct AddReviewInput {
    pub rating: i32,
    pub content: String,
}

/// The pair of foreign keys supplied alongside a new review, separate from
/// the review's own fields.
#[derive(InputObject)]
#[graphql(name = "OthersReview")]
pub struct OthersReviewInput {
    #[graphql(name = "game_id")]
    pub game_id: ID,
    #[graphql(name = "author_id")]
    pub author_id: ID,
}

impl From<AddGameInput> for NewGame {
    fn from(input: AddGameInput) -> Self {
        NewGame {
            title: input.title,
            platform: input.platform,
        }
    }
}

impl From<EditGameInput> for GamePatch {
    fn from(input: EditGameInput) -> Self {
        GamePatch {
            title: input.title,
            platform: input.platform,
        }
    }
}

impl From<AddAuthorInput> for NewAuthor {
    fn from(input: AddAuthorInput) -> Self {
        NewAuthor {
            name: input.name,
            verified: input.verified,
        }
    }
}

impl From<EditAuthorInput> for AuthorPatch {
    fn from(input: EditAuthorInput) -> Self {
        AuthorPatch {
            name: input.name,
            verified: input.verified,
        }
    }
}

impl From<AddReviewInput> for NewReview {
    fn from(input: AddReviewInput) -> Self {
        NewReview {
            rating: input.rating,
            content: input.content,
        }
    }
}

impl From<OthersReviewInput> for ReviewRefs {
    fn from(input: OthersReviewInput) -> Self {
        ReviewRefs {
            game_id: input.game_id.to_string(),
            author_id: input.author_id.to_string(),
        }
    }
}
