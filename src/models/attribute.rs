//! Attribute entity model
//!
//! This module contains the SeaORM entity model for the attributes table.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Attribute record, keyed by `(supplier_account, model_id, id)`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attributes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub supplier_account: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub model_id: String,

    /// Attribute identifier, unique within the model
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Group the attribute is displayed in
    pub group_id: String,

    pub name: String,
    pub unit: String,
    pub placeholder: String,
    pub editable: bool,
    pub required: bool,

    /// Participates in the identity of the model's asset instances
    pub is_key: bool,

    /// Validation rule or enumerated choices; grammar owned by the caller
    pub option_rule: String,

    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
