//! Client binding layer: a typed HTTP wrapper over the bookstore API.
//!
//! Mirrors the error policy of the browser client it replaces: any transport
//! failure or non-2xx response surfaces as a fixed per-operation message, and
//! the server's own error text is discarded.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::models::{Book, CartItem, Review};
use crate::services::cart_service::GUEST_USER_ID;
use crate::services::pagination::Pagination;

#[derive(Debug)]
pub struct ClientError(&'static str);

impl ClientError {
    pub fn message(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ClientError {}

/// Optional query parameters for `fetch_books`.
#[derive(Debug, Default, Clone)]
pub struct BookListParams {
    pub genre: Option<String>,
    pub search: Option<String>,
    pub featured: bool,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Optional query parameters for `fetch_reviews`.
#[derive(Debug, Default, Clone)]
pub struct ReviewListParams {
    pub book_id: Option<String>,
    pub rating: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct BooksPage {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsPage {
    pub reviews: Vec<Review>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart_items: Vec<CartItem>,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewCreated {
    pub message: String,
    pub review: Review,
}

#[derive(Debug, Deserialize)]
pub struct CartMutation {
    pub message: String,
    pub item: CartItem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRemoval {
    pub message: String,
    pub item_id: String,
}

pub struct BookstoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl BookstoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn expect_json<T: serde::de::DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
        failure: &'static str,
    ) -> Result<T, ClientError> {
        let response = response.map_err(|_| ClientError(failure))?;
        if !response.status().is_success() {
            return Err(ClientError(failure));
        }
        response.json::<T>().await.map_err(|_| ClientError(failure))
    }

    pub async fn fetch_books(&self, params: &BookListParams) -> Result<BooksPage, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(genre) = &params.genre {
            query.push(("genre", genre.clone()));
        }
        if let Some(search) = &params.search {
            query.push(("search", search.clone()));
        }
        if params.featured {
            query.push(("featured", "true".to_string()));
        }
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = params.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(sort_by) = &params.sort_by {
            query.push(("sortBy", sort_by.clone()));
        }
        if let Some(sort_order) = &params.sort_order {
            query.push(("sortOrder", sort_order.clone()));
        }

        let response = self
            .http
            .get(format!("{}/api/books", self.base_url))
            .query(&query)
            .send()
            .await;
        Self::expect_json(response, "Failed to fetch books").await
    }

    pub async fn fetch_book(&self, book_id: &str) -> Result<Book, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/books/{}", self.base_url, book_id))
            .send()
            .await;
        Self::expect_json(response, "Failed to fetch book").await
    }

    pub async fn fetch_reviews(
        &self,
        params: &ReviewListParams,
    ) -> Result<ReviewsPage, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(book_id) = &params.book_id {
            query.push(("bookId", book_id.clone()));
        }
        if let Some(rating) = params.rating {
            query.push(("rating", rating.to_string()));
        }
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = params.limit {
            query.push(("limit", limit.to_string()));
        }

        let response = self
            .http
            .get(format!("{}/api/reviews", self.base_url))
            .query(&query)
            .send()
            .await;
        Self::expect_json(response, "Failed to fetch reviews").await
    }

    pub async fn add_review(
        &self,
        book_id: &str,
        author: &str,
        rating: i32,
        title: &str,
        comment: &str,
    ) -> Result<ReviewCreated, ClientError> {
        let body = serde_json::json!({
            "bookId": book_id,
            "author": author,
            "rating": rating,
            "title": title,
            "comment": comment,
        });

        let response = self
            .http
            .post(format!("{}/api/reviews", self.base_url))
            .json(&body)
            .send()
            .await;
        Self::expect_json(response, "Failed to add review").await
    }

    pub async fn fetch_cart(&self, user_id: Option<&str>) -> Result<CartView, ClientError> {
        let user_id = user_id.unwrap_or(GUEST_USER_ID);
        let response = self
            .http
            .get(format!("{}/api/cart", self.base_url))
            .query(&[("userId", user_id)])
            .send()
            .await;
        Self::expect_json(response, "Failed to fetch cart").await
    }

    pub async fn add_to_cart(
        &self,
        book_id: &str,
        quantity: i32,
        user_id: Option<&str>,
    ) -> Result<CartMutation, ClientError> {
        let body = serde_json::json!({
            "bookId": book_id,
            "quantity": quantity,
            "userId": user_id.unwrap_or(GUEST_USER_ID),
        });

        let response = self
            .http
            .post(format!("{}/api/cart", self.base_url))
            .json(&body)
            .send()
            .await;
        Self::expect_json(response, "Failed to add item to cart").await
    }

    pub async fn update_cart_item(
        &self,
        item_id: &str,
        quantity: i32,
    ) -> Result<CartMutation, ClientError> {
        let body = serde_json::json!({
            "id": item_id,
            "quantity": quantity,
        });

        let response = self
            .http
            .put(format!("{}/api/cart", self.base_url))
            .json(&body)
            .send()
            .await;
        Self::expect_json(response, "Failed to update cart item").await
    }

    pub async fn remove_from_cart(
        &self,
        item_id: &str,
        user_id: Option<&str>,
    ) -> Result<CartRemoval, ClientError> {
        let user_id = user_id.unwrap_or(GUEST_USER_ID);
        let response = self
            .http
            .delete(format!("{}/api/cart", self.base_url))
            .query(&[("itemId", item_id), ("userId", user_id)])
            .send()
            .await;
        Self::expect_json(response, "Failed to remove item from cart").await
    }
}
