//! Attribute group entity model
//!
//! This module contains the SeaORM entity model for the attribute_groups
//! table: ordered sections of attributes within an object model.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Attribute group record, keyed by `(supplier_account, model_id, id)`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attribute_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub supplier_account: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub model_id: String,

    /// Group identifier, unique within the model
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Display order; ties are broken by `id`
    pub group_index: i32,

    /// Exactly one group per model carries this flag
    pub is_default: bool,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
