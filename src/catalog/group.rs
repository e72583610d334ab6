//! Named, ordered sections of a model's attributes.

use async_trait::async_trait;
use sea_orm::{NotSet, Set};

use super::iterator::{AttributeIterator, CatalogIterator, FromRecord};
use super::validation::{resolve_id, validate_name, validate_supplier_account};
use super::{Attribute, Catalog, Saver};
use crate::condition::Condition;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{self, attribute_group};

/// A group of attributes. Groups sort by index, then ID; exactly one group
/// per model is the default.
#[derive(Debug, Clone)]
pub struct Group {
    catalog: Catalog,
    supplier_account: String,
    model_id: Option<String>,
    id: Option<String>,
    name: String,
    index: i32,
    default: bool,
    persisted: bool,
}

impl Group {
    pub(crate) fn new(catalog: Catalog, supplier_account: String, model_id: Option<String>) -> Self {
        Self {
            catalog,
            supplier_account,
            model_id,
            id: None,
            name: String::new(),
            index: 0,
            default: false,
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

    pub fn set_index(&mut self, index: i32) -> &mut Self {
        self.index = index;
        self
    }

    /// Marks the group as its model's default; saving it demotes the
    /// previous default.
    pub fn set_default(&mut self) -> &mut Self {
        self.default = true;
        self
    }

    pub fn set_non_default(&mut self) -> &mut Self {
        self.default = false;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn supplier_account(&self) -> &str {
        &self.supplier_account
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// An unsaved attribute placed in this group.
    pub fn create_attribute(&self) -> Attribute {
        Attribute::new(
            self.catalog.clone(),
            self.supplier_account.clone(),
            self.model_id.clone(),
            self.id.clone(),
        )
    }

    /// Attributes of this group only whose name contains `name`.
    pub async fn find_attributes_like_name(&self, name: &str) -> CatalogResult<AttributeIterator> {
        let (Some(model_id), Some(id)) = (self.model_id.as_deref(), self.id.as_deref()) else {
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select = self.catalog.attributes().select_like_name(
            &self.supplier_account,
            model_id,
            Some(id),
            name,
        );
        CatalogIterator::open(&self.catalog, select).await
    }

    pub async fn find_attributes_by_condition(
        &self,
        condition: &Condition,
    ) -> CatalogResult<AttributeIterator> {
        let (Some(model_id), Some(id)) = (self.model_id.as_deref(), self.id.as_deref()) else {
            condition.to_sea_condition::<models::Attribute>()?;
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select = self.catalog.attributes().select_by_condition(
            &self.supplier_account,
            model_id,
            Some(id),
            condition,
        )?;
        CatalogIterator::open(&self.catalog, select).await
    }
}

impl FromRecord for Group {
    type Entity = attribute_group::Entity;

    fn from_record(catalog: &Catalog, record: attribute_group::Model) -> Self {
        Self {
            catalog: catalog.clone(),
            supplier_account: record.supplier_account,
            model_id: Some(record.model_id),
            id: Some(record.id),
            name: record.name,
            index: record.group_index,
            default: record.is_default,
            persisted: true,
        }
    }
}

#[async_trait]
impl Saver for Group {
    async fn save(&mut self) -> CatalogResult<()> {
        validate_supplier_account(&self.supplier_account)?;
        let model_id = self.model_id.clone().ok_or_else(|| {
            CatalogError::invariant("group was created from a model that has no ID")
        })?;
        validate_name(&self.name)?;
        let id = resolve_id("id", self.id.as_deref())?;

        let active = attribute_group::ActiveModel {
            supplier_account: Set(self.supplier_account.clone()),
            model_id: Set(model_id),
            id: Set(id),
            name: Set(self.name.clone()),
            group_index: Set(self.index),
            is_default: Set(self.default),
            created_at: NotSet,
            updated_at: NotSet,
        };
        let record = self.catalog.groups().save(active).await?;
        *self = Self::from_record(&self.catalog, record);
        Ok(())
    }
}
