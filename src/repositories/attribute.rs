//! Attribute repository for database operations
//!
//! This module provides the AttributeRepository struct which encapsulates
//! SeaORM operations for the attributes table. Attributes saved without a
//! group are routed to their model's default group.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set, TransactionTrait,
};
use std::sync::Arc;

use super::attribute_group::{find_default_in, find_in as group_find_in};
use super::object_model;
use super::required_key;
use crate::condition::{Condition, Filterable, contains_ignore_case};
use crate::error::{CatalogError, CatalogResult};
use crate::models::attribute::{self, Column, Entity as Attribute};

impl Filterable for Attribute {
    fn filter_column(field: &str) -> Option<Column> {
        match field {
            "id" => Some(Column::Id),
            "supplier_account" => Some(Column::SupplierAccount),
            "model_id" => Some(Column::ModelId),
            "group_id" => Some(Column::GroupId),
            "name" => Some(Column::Name),
            "unit" => Some(Column::Unit),
            "placeholder" => Some(Column::Placeholder),
            "editable" => Some(Column::Editable),
            "required" => Some(Column::Required),
            "key" => Some(Column::IsKey),
            "option" => Some(Column::OptionRule),
            "description" => Some(Column::Description),
            _ => None,
        }
    }
}

/// Repository for attribute database operations
#[derive(Debug, Clone)]
pub struct AttributeRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl AttributeRepository {
    /// Creates a new AttributeRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds an attribute by its ID within a model
    pub async fn find_by_id(
        &self,
        supplier_account: &str,
        model_id: &str,
        id: &str,
    ) -> CatalogResult<Option<attribute::Model>> {
        find_in(&*self.db, supplier_account, model_id, id).await
    }

    /// Writes the attribute.
    ///
    /// When `group_id` is `NotSet` the attribute lands in the model's default
    /// group; an explicit group must belong to the same model.
    pub async fn save(&self, mut active: attribute::ActiveModel) -> CatalogResult<attribute::Model> {
        let supplier_account = required_key(&active.supplier_account, "supplier_account")?;
        let model_id = required_key(&active.model_id, "model_id")?;
        let id = required_key(&active.id, "id")?;

        let txn = self.db.begin().await?;

        if object_model::lock_in(&txn, &supplier_account, &model_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::invariant(format!(
                "attribute '{}' references unknown model '{}'",
                id, model_id
            )));
        }

        let group_id = match active.group_id.clone().take() {
            Some(group_id) => {
                if group_find_in(&txn, &supplier_account, &model_id, &group_id)
                    .await?
                    .is_none()
                {
                    return Err(CatalogError::invariant(format!(
                        "attribute '{}' references unknown group '{}' of model '{}'",
                        id, group_id, model_id
                    )));
                }
                group_id
            }
            None => find_default_in(&txn, &supplier_account, &model_id)
                .await?
                .map(|group| group.id)
                .ok_or_else(|| {
                    CatalogError::invariant(format!(
                        "model '{}' has no default group to hold attribute '{}'",
                        model_id, id
                    ))
                })?,
        };

        let now = Utc::now();
        active.group_id = Set(group_id.clone());
        active.created_at = Set(now.into());
        active.updated_at = Set(now.into());

        Attribute::insert(active)
            .on_conflict(
                OnConflict::columns([Column::SupplierAccount, Column::ModelId, Column::Id])
                    .update_columns([
                        Column::GroupId,
                        Column::Name,
                        Column::Unit,
                        Column::Placeholder,
                        Column::Editable,
                        Column::Required,
                        Column::IsKey,
                        Column::OptionRule,
                        Column::Description,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let saved = find_in(&txn, &supplier_account, &model_id, &id)
            .await?
            .ok_or_else(|| CatalogError::not_found("attribute", id.clone()))?;

        txn.commit().await?;

        tracing::debug!(
            supplier_account = %supplier_account,
            model_id = %model_id,
            group_id = %group_id,
            attribute_id = %id,
            "Attribute saved"
        );

        Ok(saved)
    }

    /// Attributes of a model in ID order
    pub fn scoped(&self, supplier_account: &str, model_id: &str) -> Select<Attribute> {
        Attribute::find()
            .filter(Column::SupplierAccount.eq(supplier_account))
            .filter(Column::ModelId.eq(model_id))
            .order_by_asc(Column::Id)
    }

    /// Attributes of a model, or of one group when `group_id` is given,
    /// whose name contains `name` ignoring ASCII case
    pub fn select_like_name(
        &self,
        supplier_account: &str,
        model_id: &str,
        group_id: Option<&str>,
        name: &str,
    ) -> Select<Attribute> {
        self.in_group(supplier_account, model_id, group_id)
            .filter(contains_ignore_case(Column::Name, name))
    }

    /// Attributes of a model (or one of its groups) matching `condition`
    pub fn select_by_condition(
        &self,
        supplier_account: &str,
        model_id: &str,
        group_id: Option<&str>,
        condition: &Condition,
    ) -> CatalogResult<Select<Attribute>> {
        let filter = condition.to_sea_condition::<Attribute>()?;
        Ok(self
            .in_group(supplier_account, model_id, group_id)
            .filter(filter))
    }

    fn in_group(
        &self,
        supplier_account: &str,
        model_id: &str,
        group_id: Option<&str>,
    ) -> Select<Attribute> {
        let select = self.scoped(supplier_account, model_id);
        match group_id {
            Some(group_id) => select.filter(Column::GroupId.eq(group_id)),
            None => select,
        }
    }
}

async fn find_in<C: ConnectionTrait>(
    conn: &C,
    supplier_account: &str,
    model_id: &str,
    id: &str,
) -> CatalogResult<Option<attribute::Model>> {
    Ok(Attribute::find_by_id((
        supplier_account.to_string(),
        model_id.to_string(),
        id.to_string(),
    ))
    .one(conn)
    .await?)
}
