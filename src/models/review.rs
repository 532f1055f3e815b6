use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub book_id: String,
    pub author: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub timestamp: String,
    pub verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub book_id: String,
    pub author: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub timestamp: String,
    pub verified: bool,
}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            book_id: model.book_id,
            author: model.author,
            rating: model.rating,
            title: model.title,
            comment: model.comment,
            timestamp: model.timestamp,
            verified: model.verified,
        }
    }
}
