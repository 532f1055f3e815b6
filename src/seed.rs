use sea_orm::*;

use crate::models::{book, review};
use crate::utils::id;

/// Seed a small demo catalog. Skipped entirely when the books table already
/// has rows, so it is safe to leave SEED_DEMO set across restarts.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if book::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let books = vec![
        (
            "The Long Harbor",
            "Maya Ellison",
            14.99,
            "A slow-burn family saga set in a fading fishing town.",
            vec!["Fiction", "Drama"],
            true,
        ),
        (
            "Saltwater Letters",
            "Maya Ellison",
            11.50,
            "Collected correspondence from a decade at sea.",
            vec!["Non-Fiction", "Memoir"],
            false,
        ),
        (
            "Iron Orchard",
            "D. K. Atwell",
            18.00,
            "An industrial-age mystery with a botanical twist.",
            vec!["Fiction", "Mystery"],
            true,
        ),
        (
            "The Cartographer's Daughter",
            "Lena Voss",
            16.25,
            "Maps, borders, and the people erased between them.",
            vec!["Fiction", "Historical"],
            false,
        ),
        (
            "Practical Stargazing",
            "Tomas Reiner",
            22.40,
            "A field guide to the night sky for city dwellers.",
            vec!["Non-Fiction", "Science"],
            false,
        ),
        (
            "Glass Currents",
            "Priya Nandakumar",
            13.75,
            "Linked short stories about rivers and the cities built on them.",
            vec!["Fiction", "Short Stories"],
            true,
        ),
    ];

    let now = chrono::Utc::now().to_rfc3339();
    let mut first_book_id = None;

    for (title, author, price, description, genres, featured) in books {
        let book_id = id::book_id();
        if first_book_id.is_none() {
            first_book_id = Some(book_id.clone());
        }

        let entry = book::ActiveModel {
            id: Set(book_id),
            title: Set(title.to_owned()),
            author: Set(author.to_owned()),
            price: Set(price),
            description: Set(description.to_owned()),
            isbn: Set(None),
            pages: Set(None),
            language: Set(Some("English".to_owned())),
            publisher: Set(None),
            date_published: Set(None),
            in_stock: Set(true),
            genre: Set(serde_json::to_string(&genres).unwrap_or_else(|_| "[]".to_owned())),
            rating: Set(None),
            review_count: Set(0),
            featured: Set(featured),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        };
        entry.insert(db).await?;
    }

    // A couple of reviews on the first seeded book
    if let Some(book_id) = first_book_id {
        let reviews = vec![
            ("A. Reader", 5, "Loved it", "Could not put it down."),
            ("B. Skeptic", 3, "Fine", "Good prose, slow middle third."),
        ];

        for (author, rating, title, comment) in reviews {
            let entry = review::ActiveModel {
                id: Set(id::review_id()),
                book_id: Set(book_id.clone()),
                author: Set(author.to_owned()),
                rating: Set(rating),
                title: Set(title.to_owned()),
                comment: Set(comment.to_owned()),
                timestamp: Set(chrono::Utc::now().to_rfc3339()),
                verified: Set(false),
            };
            entry.insert(db).await?;
        }
    }

    Ok(())
}
