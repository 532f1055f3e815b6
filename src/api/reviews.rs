use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::services::error::ServiceError;
use crate::services::pagination::PageParams;
use crate::services::review_service::{
    self, CreateReviewRequest, DEFAULT_PAGE_SIZE, ReviewFilter,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    pub book_id: Option<String>,
    pub rating: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "Reviews, newest first, with pagination metadata"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_reviews(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ReviewsQuery>,
) -> Result<Json<Value>, ServiceError> {
    let filter = ReviewFilter {
        book_id: params.book_id,
        rating: params.rating,
    };
    let page = PageParams::new(params.page, params.limit, DEFAULT_PAGE_SIZE);

    let (reviews, pagination) = review_service::list_reviews(&db, filter, page).await?;

    Ok(Json(json!({
        "reviews": reviews,
        "pagination": pagination
    })))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    responses(
        (status = 201, description = "Review created with verified=false"),
        (status = 400, description = "Missing required field or invalid rating"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_review(
    State(db): State<DatabaseConnection>,
    Json(input): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let review = review_service::create_review(&db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Review added successfully",
            "review": review
        })),
    ))
}
