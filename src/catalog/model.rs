//! Object-type definitions owning groups and attributes.

use async_trait::async_trait;
use sea_orm::{NotSet, Set};

use super::iterator::{AttributeIterator, CatalogIterator, FromRecord, GroupIterator};
use super::validation::{resolve_id, validate_name, validate_supplier_account};
use super::{Attribute, Catalog, Group, Saver};
use crate::condition::Condition;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{self, object_model};

/// Definition of one asset type (host, switch, application, ...).
///
/// Saving a model also gives it a default group when it has none, so
/// attributes created straight from the model always have a home.
#[derive(Debug, Clone)]
pub struct Model {
    catalog: Catalog,
    supplier_account: String,
    classification_id: String,
    id: Option<String>,
    name: String,
    icon: String,
    position: String,
    description: String,
    creator: String,
    modifier: String,
    paused: bool,
    persisted: bool,
}

impl Model {
    pub(crate) fn new(catalog: Catalog, classification_id: String) -> Self {
        Self {
            supplier_account: catalog.supplier_account().to_string(),
            catalog,
            classification_id,
            id: None,
            name: String::new(),
            icon: String::new(),
            position: String::new(),
            description: String::new(),
            creator: String::new(),
            modifier: String::new(),
            paused: false,
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

    /// Moves the model to another classification on the next save.
    pub fn set_classification_id(&mut self, classification_id: impl Into<String>) -> &mut Self {
        self.classification_id = classification_id.into();
        self
    }

    pub fn set_position(&mut self, position: impl Into<String>) -> &mut Self {
        self.position = position.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn set_creator(&mut self, creator: impl Into<String>) -> &mut Self {
        self.creator = creator.into();
        self
    }

    pub fn set_modifier(&mut self, modifier: impl Into<String>) -> &mut Self {
        self.modifier = modifier.into();
        self
    }

    pub fn set_paused(&mut self) -> &mut Self {
        self.paused = true;
        self
    }

    pub fn set_non_paused(&mut self) -> &mut Self {
        self.paused = false;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn supplier_account(&self) -> &str {
        &self.supplier_account
    }

    pub fn classification_id(&self) -> &str {
        &self.classification_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn modifier(&self) -> &str {
        &self.modifier
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// An unsaved group of this model.
    pub fn create_group(&self) -> Group {
        Group::new(
            self.catalog.clone(),
            self.supplier_account.clone(),
            self.id.clone(),
        )
    }

    /// An unsaved attribute of this model with no group; saving it routes it
    /// to the model's default group.
    pub fn create_attribute(&self) -> Attribute {
        Attribute::new(
            self.catalog.clone(),
            self.supplier_account.clone(),
            self.id.clone(),
            None,
        )
    }

    pub async fn get_group(&self, id: &str) -> CatalogResult<Group> {
        let record = match self.id.as_deref() {
            Some(model_id) => {
                self.catalog
                    .groups()
                    .find_by_id(&self.supplier_account, model_id, id)
                    .await?
            }
            None => None,
        };
        record
            .map(|record| Group::from_record(&self.catalog, record))
            .ok_or_else(|| CatalogError::not_found("group", id))
    }

    /// The group attributes without an explicit group are routed to.
    pub async fn get_default_group(&self) -> CatalogResult<Group> {
        let model_id = self.id.as_deref().unwrap_or_default();
        self.catalog
            .groups()
            .find_default(&self.supplier_account, model_id)
            .await?
            .map(|record| Group::from_record(&self.catalog, record))
            .ok_or_else(|| CatalogError::not_found("default group of model", model_id))
    }

    pub async fn get_attribute(&self, id: &str) -> CatalogResult<Attribute> {
        let record = match self.id.as_deref() {
            Some(model_id) => {
                self.catalog
                    .attributes()
                    .find_by_id(&self.supplier_account, model_id, id)
                    .await?
            }
            None => None,
        };
        record
            .map(|record| Attribute::from_record(&self.catalog, record))
            .ok_or_else(|| CatalogError::not_found("attribute", id))
    }

    /// Attributes of every group of this model whose name contains `name`,
    /// ignoring ASCII case, in ID order.
    pub async fn find_attributes_like_name(&self, name: &str) -> CatalogResult<AttributeIterator> {
        let Some(model_id) = self.id.as_deref() else {
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select =
            self.catalog
                .attributes()
                .select_like_name(&self.supplier_account, model_id, None, name);
        CatalogIterator::open(&self.catalog, select).await
    }

    pub async fn find_attributes_by_condition(
        &self,
        condition: &Condition,
    ) -> CatalogResult<AttributeIterator> {
        let Some(model_id) = self.id.as_deref() else {
            condition.to_sea_condition::<models::Attribute>()?;
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select = self.catalog.attributes().select_by_condition(
            &self.supplier_account,
            model_id,
            None,
            condition,
        )?;
        CatalogIterator::open(&self.catalog, select).await
    }

    /// Groups of this model whose name contains `name`, in display order.
    pub async fn find_groups_like_name(&self, name: &str) -> CatalogResult<GroupIterator> {
        let Some(model_id) = self.id.as_deref() else {
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select = self
            .catalog
            .groups()
            .select_like_name(&self.supplier_account, model_id, name);
        CatalogIterator::open(&self.catalog, select).await
    }

    pub async fn find_groups_by_condition(
        &self,
        condition: &Condition,
    ) -> CatalogResult<GroupIterator> {
        let Some(model_id) = self.id.as_deref() else {
            condition.to_sea_condition::<models::AttributeGroup>()?;
            return Ok(CatalogIterator::empty(&self.catalog));
        };
        let select = self.catalog.groups().select_by_condition(
            &self.supplier_account,
            model_id,
            condition,
        )?;
        CatalogIterator::open(&self.catalog, select).await
    }
}

impl FromRecord for Model {
    type Entity = object_model::Entity;

    fn from_record(catalog: &Catalog, record: object_model::Model) -> Self {
        Self {
            catalog: catalog.clone(),
            supplier_account: record.supplier_account,
            classification_id: record.classification_id,
            id: Some(record.id),
            name: record.name,
            icon: record.icon,
            position: record.position,
            description: record.description,
            creator: record.creator,
            modifier: record.modifier,
            paused: record.paused,
            persisted: true,
        }
    }
}

#[async_trait]
impl Saver for Model {
    async fn save(&mut self) -> CatalogResult<()> {
        validate_supplier_account(&self.supplier_account)?;
        if self.classification_id.trim().is_empty() {
            return Err(CatalogError::validation(
                "classification_id",
                "must not be empty",
            ));
        }
        validate_name(&self.name)?;
        let id = resolve_id("id", self.id.as_deref())?;

        let active = object_model::ActiveModel {
            supplier_account: Set(self.supplier_account.clone()),
            id: Set(id),
            classification_id: Set(self.classification_id.clone()),
            name: Set(self.name.clone()),
            icon: Set(self.icon.clone()),
            position: Set(self.position.clone()),
            description: Set(self.description.clone()),
            creator: Set(self.creator.clone()),
            modifier: Set(self.modifier.clone()),
            paused: Set(self.paused),
            created_at: NotSet,
            updated_at: NotSet,
        };
        let record = self.catalog.models().save(active).await?;
        *self = Self::from_record(&self.catalog, record);
        Ok(())
    }
}
