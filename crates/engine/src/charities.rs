//! Charity rows as the engine sees them.
//!
//! Authentication lives in the server layer; the engine only needs the
//! declared category/tag profile for matching and the id for ownership
//! checks.

use sea_orm::entity::prelude::*;

use crate::{ResultEngine, matching::CharityProfile, util::parse_string_list};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "charities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub password: String,
    pub primary_category: String,
    /// JSON array of strings.
    pub secondary_categories: String,
    /// JSON array of strings.
    pub tags: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::resources::Entity")]
    Resources,
}

impl Related<super::resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn profile(&self) -> ResultEngine<CharityProfile> {
        Ok(CharityProfile {
            primary_category: self.primary_category.clone(),
            secondary_categories: parse_string_list(
                &self.secondary_categories,
                "secondary_categories",
            )?,
            tags: parse_string_list(&self.tags, "tags")?,
        })
    }
}
