use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub description: String,
    pub isbn: Option<String>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub date_published: Option<String>,
    pub in_stock: bool,
    pub genre: String, // JSON array
    pub rating: Option<f64>,
    pub review_count: i32,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    pub in_stock: bool,
    pub genre: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub review_count: i32,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        let genre: Vec<String> = serde_json::from_str(&model.genre).unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            price: model.price,
            description: model.description,
            isbn: model.isbn,
            pages: model.pages,
            language: model.language,
            publisher: model.publisher,
            date_published: model.date_published,
            in_stock: model.in_stock,
            genre,
            rating: model.rating,
            review_count: model.review_count,
            featured: model.featured,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Book> for ActiveModel {
    fn from(book: Book) -> Self {
        Self {
            id: Set(book.id),
            title: Set(book.title),
            author: Set(book.author),
            price: Set(book.price),
            description: Set(book.description),
            isbn: Set(book.isbn),
            pages: Set(book.pages),
            language: Set(book.language),
            publisher: Set(book.publisher),
            date_published: Set(book.date_published),
            in_stock: Set(book.in_stock),
            genre: Set(serde_json::to_string(&book.genre).unwrap_or_else(|_| "[]".to_string())),
            rating: Set(book.rating),
            review_count: Set(book.review_count),
            featured: Set(book.featured),
            created_at: Set(book.created_at),
            updated_at: Set(book.updated_at),
        }
    }
}
