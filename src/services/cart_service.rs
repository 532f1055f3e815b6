//! Cart Service - line-item listing, merge-on-add, quantity updates and
//! removal.
//!
//! The merge on add is a single upsert-with-increment statement keyed on the
//! unique (user_id, book_id) index, so concurrent adds for the same user and
//! book cannot produce duplicate rows or lost increments. The returned item
//! is always read back from storage, never computed client-side.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::models::CartItem;
use crate::models::cart_item::{self, Entity as CartEntity};
use crate::services::error::{ServiceError, missing_field, require_text};
use crate::utils::id;

/// Fallback user identifier when no real session exists.
pub const GUEST_USER_ID: &str = "guest";

/// Payload for adding a line item.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddCartItemRequest {
    pub id: Option<String>,
    pub book_id: Option<String>,
    pub quantity: Option<i32>,
    pub user_id: Option<String>,
}

/// Result of an add: the persisted item plus whether it was merged into an
/// existing row (200) or newly created (201).
#[derive(Debug)]
pub struct AddOutcome {
    pub item: CartItem,
    pub merged: bool,
}

fn require_quantity(value: Option<i32>) -> Result<i32, ServiceError> {
    let quantity = value.ok_or_else(|| missing_field("quantity"))?;
    if quantity < 1 {
        return Err(ServiceError::Validation(
            "Invalid quantity: must be at least 1".to_string(),
        ));
    }
    Ok(quantity)
}

/// List a user's line items, most recently added first.
pub async fn list_cart(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<CartItem>, ServiceError> {
    let items = CartEntity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .order_by_desc(cart_item::Column::AddedAt)
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await?;

    Ok(items.into_iter().map(CartItem::from).collect())
}

/// Add a line item, merging quantities when the user already has the book.
pub async fn add_to_cart(
    db: &DatabaseConnection,
    input: AddCartItemRequest,
) -> Result<AddOutcome, ServiceError> {
    let book_id = require_text("bookId", input.book_id)?;
    let quantity = require_quantity(input.quantity)?;
    let user_id = require_text("userId", input.user_id)?;

    // Pre-read only decides the status code; the write below is atomic
    // either way.
    let existing = CartEntity::find()
        .filter(cart_item::Column::UserId.eq(user_id.as_str()))
        .filter(cart_item::Column::BookId.eq(book_id.as_str()))
        .one(db)
        .await?;
    let merged = existing.is_some();

    let item_id = match input.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => id::cart_item_id(),
    };

    let new_item = cart_item::ActiveModel {
        id: Set(item_id),
        user_id: Set(user_id.clone()),
        book_id: Set(book_id.clone()),
        quantity: Set(quantity),
        added_at: Set(chrono::Utc::now().to_rfc3339()),
    };

    CartEntity::insert(new_item)
        .on_conflict(
            OnConflict::columns([cart_item::Column::UserId, cart_item::Column::BookId])
                .value(
                    cart_item::Column::Quantity,
                    Expr::col(cart_item::Column::Quantity).add(quantity),
                )
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    // Read the persisted row back rather than computing the merged quantity
    // from the pre-read snapshot.
    let item = CartEntity::find()
        .filter(cart_item::Column::UserId.eq(user_id.as_str()))
        .filter(cart_item::Column::BookId.eq(book_id.as_str()))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Cart item not found"))?;

    Ok(AddOutcome {
        item: CartItem::from(item),
        merged,
    })
}

/// Overwrite a line item's quantity.
pub async fn update_cart_item(
    db: &DatabaseConnection,
    item_id: &str,
    quantity: Option<i32>,
) -> Result<CartItem, ServiceError> {
    let quantity = require_quantity(quantity)?;

    let model = CartEntity::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Cart item not found"))?;

    let mut active: cart_item::ActiveModel = model.into();
    active.quantity = Set(quantity);

    let model = active.update(db).await?;
    Ok(CartItem::from(model))
}

/// Remove a line item. The identifier is unique on its own; filtering on
/// user_id as well is a defense-in-depth check, not a security boundary.
pub async fn remove_from_cart(
    db: &DatabaseConnection,
    item_id: &str,
    user_id: &str,
) -> Result<(), ServiceError> {
    let result = CartEntity::delete_many()
        .filter(cart_item::Column::Id.eq(item_id))
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound("Cart item not found"));
    }
    Ok(())
}
