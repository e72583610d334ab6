//! Top-level namespace grouping related models.

use async_trait::async_trait;
use sea_orm::{NotSet, Set};

use super::iterator::{CatalogIterator, FromRecord, ModelIterator};
use super::validation::{resolve_id, validate_name};
use super::{Catalog, Model, Saver};
use crate::condition::Condition;
use crate::error::CatalogResult;
use crate::models::classification;

#[derive(Debug, Clone)]
pub struct Classification {
    catalog: Catalog,
    id: Option<String>,
    name: String,
    icon: String,
    persisted: bool,
}

impl Classification {
    pub(crate) fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            id: None,
            name: String::new(),
            icon: String::new(),
            persisted: false,
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.icon = icon.into();
        self
    }

    /// `None` until the caller sets one or the first save assigns one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// An unsaved model in this classification and the catalog's tenant.
    pub fn create_model(&self) -> Model {
        Model::new(
            self.catalog.clone(),
            self.id.clone().unwrap_or_default(),
        )
    }

    /// Models of this classification whose name contains `name`, ignoring
    /// ASCII case.
    pub async fn find_models_like_name(&self, name: &str) -> CatalogResult<ModelIterator> {
        let Some(id) = self.id.as_deref() else {
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select = self.catalog.models().select_like_name(
            self.catalog.supplier_account(),
            Some(id),
            name,
        );
        CatalogIterator::open(&self.catalog, select).await
    }

    pub async fn find_models_by_condition(
        &self,
        condition: &Condition,
    ) -> CatalogResult<ModelIterator> {
        let Some(id) = self.id.as_deref() else {
            // Still reject a malformed condition.
            condition.to_sea_condition::<crate::models::ObjectModel>()?;
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select = self.catalog.models().select_by_condition(
            self.catalog.supplier_account(),
            Some(id),
            condition,
        )?;
        CatalogIterator::open(&self.catalog, select).await
    }
}

impl FromRecord for Classification {
    type Entity = classification::Entity;

    fn from_record(catalog: &Catalog, record: classification::Model) -> Self {
        Self {
            catalog: catalog.clone(),
            id: Some(record.id),
            name: record.name,
            icon: record.icon,
            persisted: true,
        }
    }
}

#[async_trait]
impl Saver for Classification {
    async fn save(&mut self) -> CatalogResult<()> {
        validate_name(&self.name)?;
        let id = resolve_id("id", self.id.as_deref())?;

        let active = classification::ActiveModel {
            id: Set(id),
            name: Set(self.name.clone()),
            icon: Set(self.icon.clone()),
            created_at: NotSet,
            updated_at: NotSet,
        };
        let record = self.catalog.classifications().upsert(active).await?;
        *self = Self::from_record(&self.catalog, record);
        Ok(())
    }
}
