//! Classification repository for database operations
//!
//! This module provides the ClassificationRepository struct which encapsulates
//! SeaORM operations for the classifications table.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select, Set,
};
use std::sync::Arc;

use super::required_key;
use crate::condition::{Condition, Filterable, contains_ignore_case};
use crate::error::{CatalogError, CatalogResult};
use crate::models::classification::{self, Entity as Classification};

impl Filterable for Classification {
    fn filter_column(field: &str) -> Option<classification::Column> {
        match field {
            "id" => Some(classification::Column::Id),
            "name" => Some(classification::Column::Name),
            "icon" => Some(classification::Column::Icon),
            _ => None,
        }
    }
}

/// Repository for classification database operations
#[derive(Debug, Clone)]
pub struct ClassificationRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ClassificationRepository {
    /// Creates a new ClassificationRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a classification by its ID
    pub async fn find_by_id(&self, id: &str) -> CatalogResult<Option<classification::Model>> {
        Ok(Classification::find_by_id(id.to_string())
            .one(&*self.db)
            .await?)
    }

    /// Creates the classification or overwrites the row with the same ID
    pub async fn upsert(
        &self,
        mut active: classification::ActiveModel,
    ) -> CatalogResult<classification::Model> {
        let id = required_key(&active.id, "id")?;
        let now = Utc::now();
        active.created_at = Set(now.into());
        active.updated_at = Set(now.into());

        Classification::insert(active)
            .on_conflict(
                OnConflict::column(classification::Column::Id)
                    .update_columns([
                        classification::Column::Name,
                        classification::Column::Icon,
                        classification::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;

        tracing::debug!(classification_id = %id, "Classification saved");

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| CatalogError::not_found("classification", id))
    }

    /// All classifications in ID order
    pub fn select_all(&self) -> Select<Classification> {
        Classification::find().order_by_asc(classification::Column::Id)
    }

    /// Classifications whose name contains `name`, ignoring ASCII case
    pub fn select_like_name(&self, name: &str) -> Select<Classification> {
        self.select_all()
            .filter(contains_ignore_case(classification::Column::Name, name))
    }

    /// Classifications matching `condition`
    pub fn select_by_condition(&self, condition: &Condition) -> CatalogResult<Select<Classification>> {
        let filter = condition.to_sea_condition::<Classification>()?;
        Ok(self.select_all().filter(filter))
    }
}
