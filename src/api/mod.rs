pub mod books;
pub mod cart;
pub mod health;
pub mod reviews;

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalog
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Reviews
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        // Cart
        .route(
            "/cart",
            get(cart::get_cart)
                .post(cart::add_to_cart)
                .put(cart::update_cart_item)
                .delete(cart::remove_from_cart),
        )
        .with_state(db)
}
