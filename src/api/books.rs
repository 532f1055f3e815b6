use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::services::catalog_service::{
    self, BookFilter, BookSort, CreateBookRequest, DEFAULT_PAGE_SIZE, UpdateBookRequest,
};
use crate::services::error::ServiceError;
use crate::services::pagination::PageParams;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooksQuery {
    pub genre: Option<String>,
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "Matching catalog slice with pagination metadata"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_books(
    State(db): State<DatabaseConnection>,
    Query(params): Query<BooksQuery>,
) -> Result<Json<Value>, ServiceError> {
    let filter = BookFilter {
        genre: params.genre,
        search: params.search,
        featured: params.featured,
    };
    let sort = BookSort {
        sort_by: params.sort_by,
        sort_order: params.sort_order,
    };
    let page = PageParams::new(params.page, params.limit, DEFAULT_PAGE_SIZE);

    let (books, pagination) = catalog_service::list_books(&db, filter, sort, page).await?;

    Ok(Json(json!({
        "books": books,
        "pagination": pagination
    })))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "The book"),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    let book = catalog_service::get_book(&db, &id).await?;
    Ok(Json(json!(book)))
}

#[utoipa::path(
    post,
    path = "/api/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Missing required field"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(input): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let book = catalog_service::create_book(&db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book added successfully",
            "book": book
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book updated"),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
    Json(input): Json<UpdateBookRequest>,
) -> Result<Json<Value>, ServiceError> {
    let book = catalog_service::update_book(&db, &id, input).await?;
    Ok(Json(json!({
        "message": "Book updated successfully",
        "book": book
    })))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    catalog_service::delete_book(&db, &id).await?;
    Ok(Json(json!({
        "message": "Book deleted successfully",
        "id": id
    })))
}
