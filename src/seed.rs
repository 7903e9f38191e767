// Sample catalog loader, exposed at POST /api/seed.

use serde::Serialize;

use crate::coordinator::MutationCoordinator;
use crate::error::AppResult;
use crate::models::{NewAuthor, NewGame, NewReview, ReviewRefs};

#[derive(Debug, Serialize)]
pub struct SeedSummary {
    pub games: usize,
    pub authors: usize,
    pub reviews: usize,
}

/// Load the sample catalog through the coordinator so ids come from the
/// allocator like any other write.
pub async fn seed_catalog(coordinator: &MutationCoordinator) -> AppResult<SeedSummary> {
    let games = [
        ("Zelda, Tears of the Kingdom", vec!["Switch"]),
        ("Final Fantasy 7 Remake", vec!["PS5", "Xbox"]),
        ("Elden Ring", vec!["PS5", "Xbox", "PC"]),
        ("Mario Kart", vec!["Switch"]),
        ("Pokemon Scarlet", vec!["PS5", "Xbox", "PC"]),
    ];
    let authors = [("mario", true), ("yoshi", false), ("peach", true)];
    // (rating, content, game index, author index)
    let reviews = [
        (9, "Lovely game, lots to do", 0, 0),
        (10, "A masterpiece remake", 1, 2),
        (7, "Punishing but fair", 2, 1),
        (5, "Fun with friends, thin alone", 3, 0),
        (8, "Open zone done right", 4, 2),
        (10, "Best entry in years", 0, 1),
        (6, "Performance needs work", 4, 0),
    ];

    let mut game_ids = Vec::with_capacity(games.len());
    for (title, platform) in games {
        let game = coordinator
            .add_game(NewGame {
                title: title.to_string(),
                platform: platform.into_iter().map(String::from).collect(),
            })
            .await?;
        game_ids.push(game.id);
    }

    let mut author_ids = Vec::with_capacity(authors.len());
    for (name, verified) in authors {
        let author = coordinator
            .add_author(NewAuthor {
                name: name.to_string(),
                verified,
            })
            .await?;
        author_ids.push(author.id);
    }

    for (rating, content, game_idx, author_idx) in reviews {
        coordinator
            .add_review(
                NewReview {
                    rating,
                    content: content.to_string(),
                },
                ReviewRefs {
                    game_id: game_ids[game_idx].clone(),
                    author_id: author_ids[author_idx].clone(),
                },
            )
            .await?;
    }

    let summary = SeedSummary {
        games: game_ids.len(),
        authors: author_ids.len(),
        reviews: reviews.len(),
    };
    tracing::info!(
        games = summary.games,
        authors = summary.authors,
        reviews = summary.reviews,
        "seeded sample catalog"
    );
    Ok(summary)
}
