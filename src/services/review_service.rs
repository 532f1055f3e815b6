//! Review Service - listing and append-only creation of book reviews.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

use crate::models::Review;
use crate::models::review::{self, Entity as ReviewEntity};
use crate::services::error::{ServiceError, missing_field, require_text};
use crate::services::pagination::{PageParams, Pagination};
use crate::utils::id;

pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Filter parameters for listing reviews
#[derive(Debug, Default, Clone)]
pub struct ReviewFilter {
    pub book_id: Option<String>,
    pub rating: Option<i32>,
}

/// Payload for submitting a review. `verified` is intentionally absent:
/// submitters cannot set it.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateReviewRequest {
    pub id: Option<String>,
    pub book_id: Option<String>,
    pub author: Option<String>,
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub comment: Option<String>,
}

/// List reviews, newest first, with the same pagination envelope as the
/// catalog.
pub async fn list_reviews(
    db: &DatabaseConnection,
    filter: ReviewFilter,
    page: PageParams,
) -> Result<(Vec<Review>, Pagination), ServiceError> {
    let mut query = ReviewEntity::find();

    if let Some(book_id) = &filter.book_id
        && !book_id.is_empty()
    {
        query = query.filter(review::Column::BookId.eq(book_id));
    }

    if let Some(rating) = filter.rating {
        query = query.filter(review::Column::Rating.eq(rating));
    }

    query = query
        .order_by_desc(review::Column::Timestamp)
        .order_by_asc(review::Column::Id);

    let paginator = query.paginate(db, page.limit);
    let total_count = paginator.num_items().await?;
    let reviews = paginator.fetch_page(page.index()).await?;

    Ok((
        reviews.into_iter().map(Review::from).collect(),
        Pagination::new(page, total_count),
    ))
}

/// Create a review. Required fields are checked in order (bookId, author,
/// rating, title, comment); ratings outside 1-5 are rejected; `verified` is
/// always stored false.
pub async fn create_review(
    db: &DatabaseConnection,
    input: CreateReviewRequest,
) -> Result<Review, ServiceError> {
    let book_id = require_text("bookId", input.book_id)?;
    let author = require_text("author", input.author)?;
    let rating = input.rating.ok_or_else(|| missing_field("rating"))?;
    if !(1..=5).contains(&rating) {
        return Err(ServiceError::Validation(
            "Invalid rating: must be between 1 and 5".to_string(),
        ));
    }
    let title = require_text("title", input.title)?;
    let comment = require_text("comment", input.comment)?;

    let review_id = match input.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => id::review_id(),
    };

    let new_review = review::ActiveModel {
        id: Set(review_id),
        book_id: Set(book_id),
        author: Set(author),
        rating: Set(rating),
        title: Set(title),
        comment: Set(comment),
        timestamp: Set(chrono::Utc::now().to_rfc3339()),
        verified: Set(false),
    };

    let model = new_review.insert(db).await?;
    Ok(Review::from(model))
}
