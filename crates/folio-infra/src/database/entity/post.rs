//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub author: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for folio_core::domain::Post {
    fn from(model: Model) -> Self {
        Self::from_storage(model.id, model.title, model.content, model.author)
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
///
/// A post without an id leaves the key unset so the database assigns one on
/// insert. An existing id is kept unchanged, which makes `save` an update.
impl From<folio_core::domain::Post> for ActiveModel {
    fn from(post: folio_core::domain::Post) -> Self {
        Self {
            id: match post.id() {
                Some(id) => Unchanged(id),
                None => NotSet,
            },
            title: Set(post.title().to_string()),
            content: Set(post.content().to_string()),
            author: Set(post.author().map(str::to_string)),
        }
    }
}
