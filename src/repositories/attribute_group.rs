//! Attribute group repository for database operations
//!
//! This module provides the AttributeGroupRepository struct which encapsulates
//! SeaORM operations for the attribute_groups table. It owns the
//! one-default-group-per-model invariant: promoting a group clears the flag
//! on every sibling in the same transaction.

use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set, TransactionTrait,
};
use std::sync::Arc;

use super::object_model;
use super::required_key;
use crate::condition::{Condition, Filterable, contains_ignore_case};
use crate::error::{CatalogError, CatalogResult};
use crate::models::attribute_group::{self, Column, Entity as AttributeGroup};

impl Filterable for AttributeGroup {
    fn filter_column(field: &str) -> Option<Column> {
        match field {
            "id" => Some(Column::Id),
            "supplier_account" => Some(Column::SupplierAccount),
            "model_id" => Some(Column::ModelId),
            "name" => Some(Column::Name),
            "index" => Some(Column::GroupIndex),
            "default" => Some(Column::IsDefault),
            _ => None,
        }
    }
}

/// Repository for attribute group database operations
#[derive(Debug, Clone)]
pub struct AttributeGroupRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl AttributeGroupRepository {
    /// Creates a new AttributeGroupRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a group by its ID within a model
    pub async fn find_by_id(
        &self,
        supplier_account: &str,
        model_id: &str,
        id: &str,
    ) -> CatalogResult<Option<attribute_group::Model>> {
        find_in(&*self.db, supplier_account, model_id, id).await
    }

    /// Finds the model's default group
    pub async fn find_default(
        &self,
        supplier_account: &str,
        model_id: &str,
    ) -> CatalogResult<Option<attribute_group::Model>> {
        find_default_in(&*self.db, supplier_account, model_id).await
    }

    /// Writes the group, keeping exactly one default group per model.
    ///
    /// The parent model row is locked first, so saves within one model run
    /// one at a time. A default group demotes every sibling before it is
    /// written. Demoting the model's current default group is rejected;
    /// promote another group instead.
    pub async fn save(
        &self,
        mut active: attribute_group::ActiveModel,
    ) -> CatalogResult<attribute_group::Model> {
        let supplier_account = required_key(&active.supplier_account, "supplier_account")?;
        let model_id = required_key(&active.model_id, "model_id")?;
        let id = required_key(&active.id, "id")?;
        let is_default = required_key(&active.is_default, "default")?;

        let txn = self.db.begin().await?;

        if object_model::lock_in(&txn, &supplier_account, &model_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::invariant(format!(
                "group '{}' references unknown model '{}'",
                id, model_id
            )));
        }

        let now = Utc::now();

        if is_default {
            let demoted = AttributeGroup::update_many()
                .col_expr(Column::IsDefault, Expr::value(false))
                .filter(Column::SupplierAccount.eq(supplier_account.as_str()))
                .filter(Column::ModelId.eq(model_id.as_str()))
                .filter(Column::Id.ne(id.as_str()))
                .exec(&txn)
                .await?;
            tracing::debug!(
                supplier_account = %supplier_account,
                model_id = %model_id,
                group_id = %id,
                siblings = demoted.rows_affected,
                "Cleared default flag on sibling groups"
            );
        } else if find_in(&txn, &supplier_account, &model_id, &id)
            .await?
            .is_some_and(|existing| existing.is_default)
        {
            return Err(CatalogError::invariant(format!(
                "group '{}' is the default group of model '{}'; promote another group instead",
                id, model_id
            )));
        }

        active.created_at = Set(now.into());
        active.updated_at = Set(now.into());

        AttributeGroup::insert(active)
            .on_conflict(
                OnConflict::columns([Column::SupplierAccount, Column::ModelId, Column::Id])
                    .update_columns([
                        Column::Name,
                        Column::GroupIndex,
                        Column::IsDefault,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let saved = find_in(&txn, &supplier_account, &model_id, &id)
            .await?
            .ok_or_else(|| CatalogError::not_found("group", id.clone()))?;

        txn.commit().await?;

        tracing::debug!(
            supplier_account = %supplier_account,
            model_id = %model_id,
            group_id = %id,
            is_default,
            "Attribute group saved"
        );

        Ok(saved)
    }

    /// Groups of a model in display order (index, then ID)
    pub fn scoped(&self, supplier_account: &str, model_id: &str) -> Select<AttributeGroup> {
        AttributeGroup::find()
            .filter(Column::SupplierAccount.eq(supplier_account))
            .filter(Column::ModelId.eq(model_id))
            .order_by_asc(Column::GroupIndex)
            .order_by_asc(Column::Id)
    }

    /// Groups of a model whose name contains `name`, ignoring ASCII case
    pub fn select_like_name(
        &self,
        supplier_account: &str,
        model_id: &str,
        name: &str,
    ) -> Select<AttributeGroup> {
        self.scoped(supplier_account, model_id)
            .filter(contains_ignore_case(Column::Name, name))
    }

    /// Groups of a model matching `condition`
    pub fn select_by_condition(
        &self,
        supplier_account: &str,
        model_id: &str,
        condition: &Condition,
    ) -> CatalogResult<Select<AttributeGroup>> {
        let filter = condition.to_sea_condition::<AttributeGroup>()?;
        Ok(self.scoped(supplier_account, model_id).filter(filter))
    }
}

pub(crate) async fn find_in<C: ConnectionTrait>(
    conn: &C,
    supplier_account: &str,
    model_id: &str,
    id: &str,
) -> CatalogResult<Option<attribute_group::Model>> {
    Ok(AttributeGroup::find_by_id((
        supplier_account.to_string(),
        model_id.to_string(),
        id.to_string(),
    ))
    .one(conn)
    .await?)
}

pub(crate) async fn find_default_in<C: ConnectionTrait>(
    conn: &C,
    supplier_account: &str,
    model_id: &str,
) -> CatalogResult<Option<attribute_group::Model>> {
    Ok(AttributeGroup::find()
        .filter(Column::SupplierAccount.eq(supplier_account))
        .filter(Column::ModelId.eq(model_id))
        .filter(Column::IsDefault.eq(true))
        .order_by_asc(Column::Id)
        .one(conn)
        .await?)
}
