//! Classification entity model
//!
//! This module contains the SeaORM entity model for the classifications table,
//! the top-level namespaces that group object models.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Classification record shared by every tenant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "classifications")]
pub struct Model {
    /// Unique classification identifier (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    pub name: String,

    /// Icon name rendered by the UI
    pub icon: String,

    /// Timestamp when the classification was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the classification was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::object_model::Entity")]
    ObjectModel,
}

impl Related<super::object_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ObjectModel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
