// Record kinds and their patch types. The persisted shape is the flat
// document with foreign keys as plain string fields.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A persisted record kind: names its collection and exposes its id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    type Patch: RecordPatch<Self>;

    fn id(&self) -> &str;
}

/// A sparse edit: every field is optional and only supplied fields change.
/// Replaces blind key-copy merging with an enumerated set of updatable fields.
pub trait RecordPatch<T>: Send {
    fn apply(self, record: &mut T);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub platform: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: i32,
    pub content: String,
    pub game_id: String,
    pub author_id: String,
}

impl Record for Game {
    const COLLECTION: &'static str = "games";
    type Patch = GamePatch;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Author {
    const COLLECTION: &'static str = "authors";
    type Patch = AuthorPatch;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Review {
    const COLLECTION: &'static str = "reviews";
    type Patch = ReviewPatch;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields of a game before an id is allocated.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub platform: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: String,
    pub verified: bool,
}

/// A review's own fields; the foreign keys travel separately in [`ReviewRefs`].
#[derive(Debug, Clone)]
pub struct NewReview {
    pub rating: i32,
    pub content: String,
}

/// Foreign keys supplied alongside a new review.
#[derive(Debug, Clone)]
pub struct ReviewRefs {
    pub game_id: String,
    pub author_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub title: Option<String>,
    pub platform: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub rating: Option<i32>,
    pub content: Option<String>,
}

impl RecordPatch<Game> for GamePatch {
    fn apply(self, record: &mut Game) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(platform) = self.platform {
            record.platform = platform;
        }
    }
}

impl RecordPatch<Author> for AuthorPatch {
    fn apply(self, record: &mut Author) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(verified) = self.verified {
            record.verified = verified;
        }
    }
}

impl RecordPatch<Review> for ReviewPatch {
    fn apply(self, record: &mut Review) {
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_changes_only_supplied_fields() {
        let mut game = Game {
            id: "1".to_string(),
            title: "Spiderman 2".to_string(),
            platform: vec!["PS5".to_string()],
        };

        GamePatch {
            title: Some("Spiderman 2 Remastered".to_string()),
            platform: None,
        }
        .apply(&mut game);

        assert_eq!(game.title, "Spiderman 2 Remastered");
        assert_eq!(game.platform, vec!["PS5".to_string()]);
    }

    #[test]
    fn empty_patch_is_a_noop() {
        let mut author = Author {
            id: "7".to_string(),
            name: "mario".to_string(),
            verified: true,
        };
        let before = author.clone();

        AuthorPatch::default().apply(&mut author);
        assert_eq!(author, before);
    }
}
