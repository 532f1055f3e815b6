use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bookmart::{api, db};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn test_app(db: DatabaseConnection) -> Router {
    api::api_router(db)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body was not valid JSON")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

// Helper to create a test book directly in the store
async fn create_test_book(
    db: &DatabaseConnection,
    id: &str,
    title: &str,
    author: &str,
    price: f64,
    genres: &[&str],
    featured: bool,
) {
    let now = chrono::Utc::now().to_rfc3339();
    let book = bookmart::models::book::ActiveModel {
        id: Set(id.to_string()),
        title: Set(title.to_string()),
        author: Set(author.to_string()),
        price: Set(price),
        description: Set(format!("Description of {title}")),
        isbn: Set(None),
        pages: Set(None),
        language: Set(None),
        publisher: Set(None),
        date_published: Set(None),
        in_stock: Set(true),
        genre: Set(serde_json::to_string(genres).unwrap()),
        rating: Set(None),
        review_count: Set(0),
        featured: Set(featured),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    book.insert(db).await.expect("Failed to create book");
}

#[tokio::test]
async fn create_book_generates_numeric_id_and_timestamps() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let payload = json!({
        "title": "A",
        "author": "B",
        "price": 9.99,
        "description": "d"
    });
    let response = app
        .oneshot(json_request("POST", "/books", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Book added successfully");

    let book = &body["book"];
    let id = book["id"].as_str().expect("id missing");
    assert!(!id.is_empty());
    assert!(id.chars().all(|c| c.is_ascii_digit()));
    assert!(book["createdAt"].is_string());
    assert!(book["updatedAt"].is_string());
    assert_eq!(book["inStock"], true);
    assert_eq!(book["featured"], false);
    assert_eq!(book["reviewCount"], 0);
}

#[tokio::test]
async fn created_books_get_unique_ids() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let mut ids = Vec::new();
    for i in 0..5 {
        let payload = json!({
            "title": format!("Book {i}"),
            "author": "Someone",
            "price": 5.0,
            "description": "d"
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/books", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        ids.push(body["book"]["id"].as_str().unwrap().to_string());
    }

    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn genre_all_matches_unfiltered_listing() {
    let db = setup_test_db().await;
    create_test_book(&db, "1", "One", "A", 10.0, &["Fiction"], false).await;
    create_test_book(&db, "2", "Two", "B", 12.0, &["Science"], false).await;
    create_test_book(&db, "3", "Three", "C", 8.0, &[], true).await;
    let app = test_app(db);

    let unfiltered = body_json(app.clone().oneshot(get("/books")).await.unwrap()).await;
    let all = body_json(app.oneshot(get("/books?genre=All")).await.unwrap()).await;

    assert_eq!(unfiltered["books"], all["books"]);
    assert_eq!(unfiltered["pagination"], all["pagination"]);
    assert_eq!(unfiltered["pagination"]["totalCount"], 3);
}

#[tokio::test]
async fn genre_filter_matches_whole_elements_only() {
    let db = setup_test_db().await;
    create_test_book(&db, "1", "One", "A", 10.0, &["Fiction"], false).await;
    create_test_book(&db, "2", "Two", "B", 12.0, &["Science Fiction"], false).await;
    let app = test_app(db);

    let body = body_json(app.oneshot(get("/books?genre=Fiction")).await.unwrap()).await;
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], "1");
}

#[tokio::test]
async fn fiction_catalog_paginates_with_ceiling_division() {
    let db = setup_test_db().await;
    for i in 0..25 {
        create_test_book(
            &db,
            &format!("f{i:02}"),
            &format!("Fiction {i:02}"),
            "A",
            10.0,
            &["Fiction"],
            false,
        )
        .await;
    }
    for i in 0..5 {
        create_test_book(&db, &format!("s{i}"), "Other", "B", 10.0, &["Science"], false).await;
    }
    let app = test_app(db);

    let body = body_json(
        app.oneshot(get("/books?genre=Fiction&page=2&limit=10"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(body["books"].as_array().unwrap().len(), 10);
    assert_eq!(
        body["pagination"],
        json!({
            "page": 2,
            "limit": 10,
            "totalCount": 25,
            "totalPages": 3,
            "hasNext": true,
            "hasPrev": true
        })
    );
}

#[tokio::test]
async fn listing_sorts_with_id_tiebreak() {
    let db = setup_test_db().await;
    create_test_book(&db, "b", "Same Title", "A", 10.0, &[], false).await;
    create_test_book(&db, "a", "Same Title", "B", 20.0, &[], false).await;
    create_test_book(&db, "c", "Another Title", "C", 15.0, &[], false).await;
    let app = test_app(db);

    // Duplicate titles fall back to id ascending
    let body = body_json(app.clone().oneshot(get("/books?sortBy=title")).await.unwrap()).await;
    let ids: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);

    let body = body_json(
        app.oneshot(get("/books?sortBy=price&sortOrder=desc"))
            .await
            .unwrap(),
    )
    .await;
    let prices: Vec<f64> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![20.0, 15.0, 10.0]);
}

#[tokio::test]
async fn search_is_case_insensitive_across_fields() {
    let db = setup_test_db().await;
    create_test_book(&db, "1", "Learning Rust", "A", 10.0, &[], false).await;
    create_test_book(&db, "2", "Gardening", "Rusty Shackleford", 12.0, &[], false).await;
    create_test_book(&db, "3", "Cooking", "B", 8.0, &[], false).await;
    let app = test_app(db);

    let body = body_json(app.oneshot(get("/books?search=rust")).await.unwrap()).await;
    let ids: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    // Matches title of book 1 and author of book 2; "Description of Cooking"
    // does not contain "rust".
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"1"));
    assert!(ids.contains(&"2"));
}

#[tokio::test]
async fn featured_filter_restricts_to_flagged_books() {
    let db = setup_test_db().await;
    create_test_book(&db, "1", "One", "A", 10.0, &[], true).await;
    create_test_book(&db, "2", "Two", "B", 12.0, &[], false).await;
    let app = test_app(db);

    let body = body_json(app.oneshot(get("/books?featured=true")).await.unwrap()).await;
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], "1");
}

#[tokio::test]
async fn update_book_is_idempotent_apart_from_updated_at() {
    let db = setup_test_db().await;
    create_test_book(&db, "1", "One", "A", 10.0, &["Fiction"], false).await;
    let app = test_app(db);

    let payload = json!({ "title": "Renamed", "price": 12.5 });
    let first = body_json(
        app.clone()
            .oneshot(json_request("PUT", "/books/1", &payload))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.clone()
            .oneshot(json_request("PUT", "/books/1", &payload))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["message"], "Book updated successfully");
    let mut a = first["book"].clone();
    let mut b = second["book"].clone();
    a["updatedAt"] = Value::Null;
    b["updatedAt"] = Value::Null;
    assert_eq!(a, b);

    // Untouched fields survive the partial update
    let fetched = body_json(app.oneshot(get("/books/1")).await.unwrap()).await;
    assert_eq!(fetched["title"], "Renamed");
    assert_eq!(fetched["price"], 12.5);
    assert_eq!(fetched["author"], "A");
    assert_eq!(fetched["genre"], json!(["Fiction"]));
}

#[tokio::test]
async fn delete_book_then_fetch_returns_not_found() {
    let db = setup_test_db().await;
    create_test_book(&db, "1", "One", "A", 10.0, &[], false).await;
    let app = test_app(db);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/books/1")
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Book deleted successfully");
    assert_eq!(body["id"], "1");

    let response = app.oneshot(get("/books/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_submission_forces_verified_false() {
    let db = setup_test_db().await;
    create_test_book(&db, "b1", "One", "A", 10.0, &[], false).await;
    let app = test_app(db);

    // Caller tries to smuggle verified=true; the field is not accepted.
    let payload = json!({
        "bookId": "b1",
        "author": "Reader",
        "rating": 5,
        "title": "Great",
        "comment": "Loved it",
        "verified": true
    });
    let response = app
        .oneshot(json_request("POST", "/reviews", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Review added successfully");
    assert_eq!(body["review"]["verified"], false);
    assert!(
        body["review"]["id"]
            .as_str()
            .unwrap()
            .starts_with("review-")
    );
    assert!(body["review"]["timestamp"].is_string());
}

#[tokio::test]
async fn reviews_list_newest_first_with_filters() {
    let db = setup_test_db().await;
    let app = test_app(db.clone());

    for (book, rating) in [("b1", 5), ("b1", 3), ("b2", 5)] {
        let payload = json!({
            "bookId": book,
            "author": "Reader",
            "rating": rating,
            "title": "T",
            "comment": "C"
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/reviews", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body = body_json(app.clone().oneshot(get("/reviews?bookId=b1")).await.unwrap()).await;
    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(body["pagination"]["limit"], 20);
    // Newest first
    let t0 = reviews[0]["timestamp"].as_str().unwrap();
    let t1 = reviews[1]["timestamp"].as_str().unwrap();
    assert!(t0 >= t1);

    let body = body_json(
        app.oneshot(get("/reviews?bookId=b1&rating=5"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(body["reviews"][0]["rating"], 5);
}

#[tokio::test]
async fn adding_same_book_twice_merges_into_one_row() {
    let db = setup_test_db().await;
    let app = test_app(db.clone());

    let payload = json!({ "bookId": "b1", "userId": "u1", "quantity": 2 });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/cart", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Item added to cart successfully");
    assert_eq!(body["item"]["quantity"], 2);
    assert!(body["item"]["id"].as_str().unwrap().starts_with("cart-"));

    let response = app
        .clone()
        .oneshot(json_request("POST", "/cart", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Cart item quantity updated");
    assert_eq!(body["item"]["quantity"], 4);

    // Exactly one row persisted
    let rows = bookmart::models::cart_item::Entity::find()
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let body = body_json(app.oneshot(get("/cart?userId=u1")).await.unwrap()).await;
    assert_eq!(body["userId"], "u1");
    let items = body["cartItems"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 4);
}

#[tokio::test]
async fn cart_listing_defaults_to_guest() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let payload = json!({ "bookId": "b1", "userId": "guest", "quantity": 1 });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/cart", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(app.oneshot(get("/cart")).await.unwrap()).await;
    assert_eq!(body["userId"], "guest");
    assert_eq!(body["cartItems"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_cart_item_overwrites_quantity() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let payload = json!({ "bookId": "b1", "userId": "u1", "quantity": 2 });
    let body = body_json(
        app.clone()
            .oneshot(json_request("POST", "/cart", &payload))
            .await
            .unwrap(),
    )
    .await;
    let item_id = body["item"]["id"].as_str().unwrap().to_string();

    let payload = json!({ "id": item_id, "quantity": 7 });
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/cart", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Cart item updated successfully");
    assert_eq!(body["item"]["quantity"], 7);

    let body = body_json(app.oneshot(get("/cart?userId=u1")).await.unwrap()).await;
    assert_eq!(body["cartItems"][0]["quantity"], 7);
}

#[tokio::test]
async fn remove_missing_cart_item_is_not_found_and_changes_nothing() {
    let db = setup_test_db().await;
    let app = test_app(db.clone());

    let payload = json!({ "bookId": "b1", "userId": "u1", "quantity": 2 });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/cart", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/cart?itemId=missing&userId=u1")
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let rows = bookmart::models::cart_item::Entity::find()
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn remove_cart_item_round_trip() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let payload = json!({ "bookId": "b1", "userId": "u1", "quantity": 2 });
    let body = body_json(
        app.clone()
            .oneshot(json_request("POST", "/cart", &payload))
            .await
            .unwrap(),
    )
    .await;
    let item_id = body["item"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(&format!("/cart?itemId={item_id}&userId=u1"))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Item removed from cart successfully");
    assert_eq!(body["itemId"], item_id);

    let body = body_json(app.oneshot(get("/cart?userId=u1")).await.unwrap()).await;
    assert!(body["cartItems"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_check_reports_ok() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bookmart");
}
