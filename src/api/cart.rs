use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::services::cart_service::{self, AddCartItemRequest, GUEST_USER_ID};
use crate::services::error::ServiceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartQuery {
    pub item_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCartRequest {
    pub id: Option<String>,
    pub quantity: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "The user's line items, most recently added first"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cart(
    State(db): State<DatabaseConnection>,
    Query(params): Query<CartQuery>,
) -> Result<Json<Value>, ServiceError> {
    let user_id = params.user_id.unwrap_or_else(|| GUEST_USER_ID.to_string());
    let cart_items = cart_service::list_cart(&db, &user_id).await?;

    Ok(Json(json!({
        "cartItems": cart_items,
        "userId": user_id
    })))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    responses(
        (status = 200, description = "Quantity merged into an existing line item"),
        (status = 201, description = "New line item created"),
        (status = 400, description = "Missing required field or invalid quantity"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_to_cart(
    State(db): State<DatabaseConnection>,
    Json(input): Json<AddCartItemRequest>,
) -> Result<Response, ServiceError> {
    let outcome = cart_service::add_to_cart(&db, input).await?;

    let response = if outcome.merged {
        (
            StatusCode::OK,
            Json(json!({
                "message": "Cart item quantity updated",
                "item": outcome.item
            })),
        )
    } else {
        (
            StatusCode::CREATED,
            Json(json!({
                "message": "Item added to cart successfully",
                "item": outcome.item
            })),
        )
    };
    Ok(response.into_response())
}

#[utoipa::path(
    put,
    path = "/api/cart",
    responses(
        (status = 200, description = "Line item quantity overwritten"),
        (status = 400, description = "Missing id or quantity"),
        (status = 404, description = "Cart item not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_cart_item(
    State(db): State<DatabaseConnection>,
    Json(input): Json<UpdateCartRequest>,
) -> Result<Json<Value>, ServiceError> {
    let item_id = match input.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            return Err(ServiceError::Validation(
                "Missing required fields: id and quantity".to_string(),
            ));
        }
    };

    let item = cart_service::update_cart_item(&db, &item_id, input.quantity).await?;

    Ok(Json(json!({
        "message": "Cart item updated successfully",
        "item": item
    })))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Line item removed"),
        (status = 400, description = "Missing itemId parameter"),
        (status = 404, description = "Cart item not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_from_cart(
    State(db): State<DatabaseConnection>,
    Query(params): Query<RemoveCartQuery>,
) -> Result<Json<Value>, ServiceError> {
    let item_id = match params.item_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Err(ServiceError::Validation(
                "Missing itemId parameter".to_string(),
            ));
        }
    };
    let user_id = params.user_id.unwrap_or_else(|| GUEST_USER_ID.to_string());

    cart_service::remove_from_cart(&db, &item_id, &user_id).await?;

    Ok(Json(json!({
        "message": "Item removed from cart successfully",
        "itemId": item_id
    })))
}
