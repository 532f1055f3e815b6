use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One line item in a user's cart. At most one row exists per
/// (user_id, book_id) pair, backed by a unique index; merging is done with an
/// atomic increment in the cart service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub quantity: i32,
    pub added_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub quantity: i32,
    pub added_at: String,
}

impl From<Model> for CartItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            book_id: model.book_id,
            quantity: model.quantity,
            added_at: model.added_at,
        }
    }
}
