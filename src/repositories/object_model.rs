//! Object model repository for database operations
//!
//! This module provides the ObjectModelRepository struct which encapsulates
//! SeaORM operations for the object_models table with tenant-aware methods.
//! Saving a model also guarantees that the model owns a default attribute
//! group.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::attribute_group::{find_default_in, find_in as group_find_in};
use super::required_key;
use crate::condition::{Condition, Filterable, contains_ignore_case};
use crate::error::{CatalogError, CatalogResult};
use crate::models::attribute_group::{self, Entity as AttributeGroup};
use crate::models::classification::Entity as Classification;
use crate::models::object_model::{self, Entity as ObjectModel};

/// ID given to the group created implicitly for a model without one.
pub const DEFAULT_GROUP_ID: &str = "default";
/// Name given to the implicitly created default group.
pub const DEFAULT_GROUP_NAME: &str = "Default";
/// The implicit default group sorts ahead of caller-created groups.
pub const DEFAULT_GROUP_INDEX: i32 = -1;

impl Filterable for ObjectModel {
    fn filter_column(field: &str) -> Option<object_model::Column> {
        use object_model::Column;
        match field {
            "id" => Some(Column::Id),
            "supplier_account" => Some(Column::SupplierAccount),
            "classification_id" => Some(Column::ClassificationId),
            "name" => Some(Column::Name),
            "icon" => Some(Column::Icon),
            "position" => Some(Column::Position),
            "description" => Some(Column::Description),
            "creator" => Some(Column::Creator),
            "modifier" => Some(Column::Modifier),
            "paused" => Some(Column::Paused),
            _ => None,
        }
    }
}

/// Repository for object model database operations
#[derive(Debug, Clone)]
pub struct ObjectModelRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ObjectModelRepository {
    /// Creates a new ObjectModelRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a model by its ID within a tenant scope
    pub async fn find_by_id(
        &self,
        supplier_account: &str,
        id: &str,
    ) -> CatalogResult<Option<object_model::Model>> {
        find_in(&*self.db, supplier_account, id).await
    }

    /// Writes the model and makes sure it owns a default group.
    ///
    /// Both steps share one transaction; the model's classification must
    /// already exist.
    pub async fn save(
        &self,
        mut active: object_model::ActiveModel,
    ) -> CatalogResult<object_model::Model> {
        let supplier_account = required_key(&active.supplier_account, "supplier_account")?;
        let id = required_key(&active.id, "id")?;
        let classification_id = required_key(&active.classification_id, "classification_id")?;

        let txn = self.db.begin().await?;

        if Classification::find_by_id(classification_id.clone())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(CatalogError::invariant(format!(
                "model '{}' references unknown classification '{}'",
                id, classification_id
            )));
        }

        let now = Utc::now();
        active.created_at = Set(now.into());
        active.updated_at = Set(now.into());

        ObjectModel::insert(active)
            .on_conflict(
                OnConflict::columns([
                    object_model::Column::SupplierAccount,
                    object_model::Column::Id,
                ])
                .update_columns([
                    object_model::Column::ClassificationId,
                    object_model::Column::Name,
                    object_model::Column::Icon,
                    object_model::Column::Position,
                    object_model::Column::Description,
                    object_model::Column::Creator,
                    object_model::Column::Modifier,
                    object_model::Column::Paused,
                    object_model::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        ensure_default_group(&txn, &supplier_account, &id).await?;

        let saved = find_in(&txn, &supplier_account, &id)
            .await?
            .ok_or_else(|| CatalogError::not_found("model", id.clone()))?;

        txn.commit().await?;

        tracing::debug!(
            supplier_account = %supplier_account,
            model_id = %id,
            classification_id = %classification_id,
            "Model saved"
        );

        Ok(saved)
    }

    /// Models of a tenant in ID order, optionally limited to one classification
    pub fn scoped(
        &self,
        supplier_account: &str,
        classification_id: Option<&str>,
    ) -> Select<ObjectModel> {
        let mut select = ObjectModel::find()
            .filter(object_model::Column::SupplierAccount.eq(supplier_account));
        if let Some(classification_id) = classification_id {
            select = select.filter(object_model::Column::ClassificationId.eq(classification_id));
        }
        select.order_by_asc(object_model::Column::Id)
    }

    /// Scoped models whose name contains `name`, ignoring ASCII case
    pub fn select_like_name(
        &self,
        supplier_account: &str,
        classification_id: Option<&str>,
        name: &str,
    ) -> Select<ObjectModel> {
        self.scoped(supplier_account, classification_id)
            .filter(contains_ignore_case(object_model::Column::Name, name))
    }

    /// Scoped models matching `condition`
    pub fn select_by_condition(
        &self,
        supplier_account: &str,
        classification_id: Option<&str>,
        condition: &Condition,
    ) -> CatalogResult<Select<ObjectModel>> {
        let filter = condition.to_sea_condition::<ObjectModel>()?;
        Ok(self.scoped(supplier_account, classification_id).filter(filter))
    }
}

pub(crate) async fn find_in<C: ConnectionTrait>(
    conn: &C,
    supplier_account: &str,
    id: &str,
) -> CatalogResult<Option<object_model::Model>> {
    Ok(
        ObjectModel::find_by_id((supplier_account.to_string(), id.to_string()))
            .one(conn)
            .await?,
    )
}

/// Row-locking lookup of a model (`SELECT ... FOR UPDATE`).
///
/// Writers that touch a model's groups take this lock first, so saves that
/// move the default flag run one at a time per model. SQLite has no row
/// locks; its single writer already serializes transactions.
pub(crate) fn lock_select(supplier_account: &str, id: &str) -> Select<ObjectModel> {
    ObjectModel::find_by_id((supplier_account.to_string(), id.to_string())).lock_exclusive()
}

pub(crate) async fn lock_in<C: ConnectionTrait>(
    conn: &C,
    supplier_account: &str,
    id: &str,
) -> CatalogResult<Option<object_model::Model>> {
    Ok(lock_select(supplier_account, id).one(conn).await?)
}

async fn ensure_default_group<C: ConnectionTrait>(
    conn: &C,
    supplier_account: &str,
    model_id: &str,
) -> CatalogResult<()> {
    if lock_in(conn, supplier_account, model_id).await?.is_none() {
        return Err(CatalogError::invariant(format!(
            "model '{}' is missing while writing its default group",
            model_id
        )));
    }

    if find_default_in(conn, supplier_account, model_id)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let id_taken = group_find_in(conn, supplier_account, model_id, DEFAULT_GROUP_ID)
        .await?
        .is_some();
    let group_id = if id_taken {
        Uuid::new_v4().simple().to_string()
    } else {
        DEFAULT_GROUP_ID.to_string()
    };

    let now = Utc::now();
    let group = attribute_group::ActiveModel {
        supplier_account: Set(supplier_account.to_string()),
        model_id: Set(model_id.to_string()),
        id: Set(group_id.clone()),
        name: Set(DEFAULT_GROUP_NAME.to_string()),
        group_index: Set(DEFAULT_GROUP_INDEX),
        is_default: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    AttributeGroup::insert(group)
        .exec_without_returning(conn)
        .await?;

    tracing::info!(
        supplier_account = %supplier_account,
        model_id = %model_id,
        group_id = %group_id,
        "Created default attribute group"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_model_lock_is_a_row_lock_on_postgres() {
        let sql = lock_select("0", "host").build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""object_models""#), "{sql}");
        assert!(sql.contains("FOR UPDATE"), "{sql}");
    }

    #[test]
    fn test_model_lock_is_omitted_on_sqlite() {
        let sql = lock_select("0", "host").build(DbBackend::Sqlite).to_string();
        assert!(!sql.contains("FOR UPDATE"), "{sql}");
    }
}
