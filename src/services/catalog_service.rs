//! Catalog Service - filtering, search, sorting and pagination over the book
//! collection, plus single-book CRUD.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::models::Book;
use crate::models::book::{self, Entity as BookEntity};
use crate::services::error::{ServiceError, missing_field, require_text};
use crate::services::pagination::{PageParams, Pagination};
use crate::utils::id;

pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Genre value that disables the genre filter.
const GENRE_ALL: &str = "All";

/// Filter parameters for listing books
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    pub genre: Option<String>,
    pub search: Option<String>,
    pub featured: Option<bool>,
}

/// Sort parameters for listing books. Unknown fields fall back to title.
#[derive(Debug, Default, Clone)]
pub struct BookSort {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Payload for creating a book. Everything is optional at the wire level;
/// required fields are checked in order by `create_book`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub date_published: Option<String>,
    pub in_stock: Option<bool>,
    pub genre: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub featured: Option<bool>,
}

/// Partial update payload. Absent fields keep their stored value.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub date_published: Option<String>,
    pub in_stock: Option<bool>,
    pub genre: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub featured: Option<bool>,
}

fn sort_column(name: Option<&str>) -> book::Column {
    match name {
        Some("author") => book::Column::Author,
        Some("price") => book::Column::Price,
        Some("rating") => book::Column::Rating,
        Some("datePublished") => book::Column::DatePublished,
        Some("createdAt") => book::Column::CreatedAt,
        _ => book::Column::Title,
    }
}

/// List books with optional filters, sorted and paginated.
///
/// Rows with equal sort-key values are tie-broken by id ascending so that
/// pagination is reproducible.
pub async fn list_books(
    db: &DatabaseConnection,
    filter: BookFilter,
    sort: BookSort,
    page: PageParams,
) -> Result<(Vec<Book>, Pagination), ServiceError> {
    let mut query = BookEntity::find();

    if let Some(genre) = &filter.genre
        && !genre.is_empty()
        && genre != GENRE_ALL
    {
        // Match the quoted JSON element so "Fiction" does not match
        // "Science Fiction".
        query = query.filter(book::Column::Genre.contains(&format!("\"{}\"", genre)));
    }

    if let Some(search) = &filter.search
        && !search.is_empty()
    {
        // SQLite LIKE is case-insensitive for ASCII.
        query = query.filter(
            Condition::any()
                .add(book::Column::Title.contains(search))
                .add(book::Column::Author.contains(search))
                .add(book::Column::Description.contains(search)),
        );
    }

    if filter.featured == Some(true) {
        query = query.filter(book::Column::Featured.eq(true));
    }

    let order = match sort.sort_order.as_deref() {
        Some("desc") => Order::Desc,
        _ => Order::Asc,
    };
    query = query
        .order_by(sort_column(sort.sort_by.as_deref()), order)
        .order_by_asc(book::Column::Id);

    let paginator = query.paginate(db, page.limit);
    let total_count = paginator.num_items().await?;
    let books = paginator.fetch_page(page.index()).await?;

    Ok((
        books.into_iter().map(Book::from).collect(),
        Pagination::new(page, total_count),
    ))
}

/// Fetch a single book by identifier.
pub async fn get_book(db: &DatabaseConnection, book_id: &str) -> Result<Book, ServiceError> {
    BookEntity::find_by_id(book_id)
        .one(db)
        .await?
        .map(Book::from)
        .ok_or(ServiceError::NotFound("Book not found"))
}

/// Create a book. Required fields are checked in order; the first missing
/// one is named in the error.
pub async fn create_book(
    db: &DatabaseConnection,
    input: CreateBookRequest,
) -> Result<Book, ServiceError> {
    let title = require_text("title", input.title)?;
    let author = require_text("author", input.author)?;
    let price = input.price.ok_or_else(|| missing_field("price"))?;
    let description = require_text("description", input.description)?;

    let book_id = match input.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => id::book_id(),
    };
    let now = chrono::Utc::now().to_rfc3339();

    let new_book = book::ActiveModel {
        id: Set(book_id),
        title: Set(title),
        author: Set(author),
        price: Set(price),
        description: Set(description),
        isbn: Set(input.isbn),
        pages: Set(input.pages),
        language: Set(input.language),
        publisher: Set(input.publisher),
        date_published: Set(input.date_published),
        in_stock: Set(input.in_stock.unwrap_or(true)),
        genre: Set(serde_json::to_string(&input.genre.unwrap_or_default())
            .unwrap_or_else(|_| "[]".to_string())),
        rating: Set(input.rating),
        review_count: Set(input.review_count.unwrap_or(0)),
        featured: Set(input.featured.unwrap_or(false)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };

    let model = new_book.insert(db).await?;
    Ok(Book::from(model))
}

/// Partially update a book, re-stamping updatedAt.
pub async fn update_book(
    db: &DatabaseConnection,
    book_id: &str,
    input: UpdateBookRequest,
) -> Result<Book, ServiceError> {
    let model = BookEntity::find_by_id(book_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Book not found"))?;

    let mut active: book::ActiveModel = model.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(author) = input.author {
        active.author = Set(author);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(isbn) = input.isbn {
        active.isbn = Set(Some(isbn));
    }
    if let Some(pages) = input.pages {
        active.pages = Set(Some(pages));
    }
    if let Some(language) = input.language {
        active.language = Set(Some(language));
    }
    if let Some(publisher) = input.publisher {
        active.publisher = Set(Some(publisher));
    }
    if let Some(date_published) = input.date_published {
        active.date_published = Set(Some(date_published));
    }
    if let Some(in_stock) = input.in_stock {
        active.in_stock = Set(in_stock);
    }
    if let Some(genre) = input.genre {
        active.genre = Set(serde_json::to_string(&genre).unwrap_or_else(|_| "[]".to_string()));
    }
    if let Some(rating) = input.rating {
        active.rating = Set(Some(rating));
    }
    if let Some(review_count) = input.review_count {
        active.review_count = Set(review_count);
    }
    if let Some(featured) = input.featured {
        active.featured = Set(featured);
    }
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = active.update(db).await?;
    Ok(Book::from(model))
}

/// Delete a book by identifier.
pub async fn delete_book(db: &DatabaseConnection, book_id: &str) -> Result<(), ServiceError> {
    let result = BookEntity::delete_by_id(book_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound("Book not found"));
    }
    Ok(())
}
