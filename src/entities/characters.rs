use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// No uniqueness on (`show_id`, `name`): the seed data carries a duplicate row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "characters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub show_id: i32,
    pub name: String,
    pub actor_name: String,
    pub bio: String,
    pub is_main_character: bool,
    /// Free text, e.g. `alive` or `deceased`.
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
