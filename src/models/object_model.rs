//! Object model entity
//!
//! This module contains the SeaORM entity model for the object_models table.
//! Each row defines one asset type for one tenant (supplier account).

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Object model record, keyed by `(supplier_account, id)`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "object_models")]
pub struct Model {
    /// Owning tenant
    #[sea_orm(primary_key, auto_increment = false)]
    pub supplier_account: String,

    /// Model identifier, unique within the tenant
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Classification this model belongs to
    pub classification_id: String,

    pub name: String,
    pub icon: String,

    /// UI layout hint (opaque to the catalog)
    pub position: String,

    pub description: String,
    pub creator: String,
    pub modifier: String,

    /// Soft-disable flag
    pub paused: bool,

    /// Timestamp when the model was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the model was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classification::Entity",
        from = "Column::ClassificationId",
        to = "super::classification::Column::Id"
    )]
    Classification,
}

impl Related<super::classification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
