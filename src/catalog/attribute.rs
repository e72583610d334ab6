//! Field definitions of a model.

use async_trait::async_trait;
use sea_orm::{NotSet, Set};

use super::iterator::FromRecord;
use super::validation::{resolve_id, validate_name, validate_supplier_account};
use super::{Catalog, Saver};
use crate::error::{CatalogError, CatalogResult};
use crate::models::attribute;

/// One field of a model. New attributes are editable, optional and not
/// part of the model's key.
#[derive(Debug, Clone)]
pub struct Attribute {
    catalog: Catalog,
    supplier_account: String,
    model_id: Option<String>,
    group_id: Option<String>,
    id: Option<String>,
    name: String,
    unit: String,
    placeholder: String,
    editable: bool,
    required: bool,
    key: bool,
    option: String,
    description: String,
    persisted: bool,
}

impl Attribute {
    pub(crate) fn new(
        catalog: Catalog,
        supplier_account: String,
        model_id: Option<String>,
        group_id: Option<String>,
    ) -> Self {
        Self {
            catalog,
            supplier_account,
            model_id,
            group_id,
            id: None,
            name: String::new(),
            unit: String::new(),
            placeholder: String::new(),
            editable: true,
            required: false,
            key: false,
            option: String::new(),
            description: String::new(),
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

    /// Moves the attribute to another group of the same model.
    pub fn set_group_id(&mut self, group_id: impl Into<String>) -> &mut Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) -> &mut Self {
        self.unit = unit.into();
        self
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) -> &mut Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn set_editable(&mut self) -> &mut Self {
        self.editable = true;
        self
    }

    pub fn set_non_editable(&mut self) -> &mut Self {
        self.editable = false;
        self
    }

    pub fn set_required(&mut self) -> &mut Self {
        self.required = true;
        self
    }

    pub fn set_non_required(&mut self) -> &mut Self {
        self.required = false;
        self
    }

    /// Key attributes must also be required.
    pub fn set_key(&mut self, key: bool) -> &mut Self {
        self.key = key;
        self
    }

    /// Free-form validation rule or enumerated choices.
    pub fn set_option(&mut self, option: impl Into<String>) -> &mut Self {
        self.option = option.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
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

    /// `None` for an unsaved attribute created from its model.
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn is_key(&self) -> bool {
        self.key
    }

    pub fn option(&self) -> &str {
        &self.option
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }
}

impl FromRecord for Attribute {
    type Entity = attribute::Entity;

    fn from_record(catalog: &Catalog, record: attribute::Model) -> Self {
        Self {
            catalog: catalog.clone(),
            supplier_account: record.supplier_account,
            model_id: Some(record.model_id),
            group_id: Some(record.group_id),
            id: Some(record.id),
            name: record.name,
            unit: record.unit,
            placeholder: record.placeholder,
            editable: record.editable,
            required: record.required,
            key: record.is_key,
            option: record.option_rule,
            description: record.description,
            persisted: true,
        }
    }
}

#[async_trait]
impl Saver for Attribute {
    async fn save(&mut self) -> CatalogResult<()> {
        validate_supplier_account(&self.supplier_account)?;
        let model_id = self.model_id.clone().ok_or_else(|| {
            CatalogError::invariant("attribute was created from a model that has no ID")
        })?;
        validate_name(&self.name)?;
        if self.key && !self.required {
            return Err(CatalogError::validation(
                "required",
                "key attributes must be required",
            ));
        }
        let id = resolve_id("id", self.id.as_deref())?;

        let active = attribute::ActiveModel {
            supplier_account: Set(self.supplier_account.clone()),
            model_id: Set(model_id),
            id: Set(id),
            group_id: match &self.group_id {
                Some(group_id) => Set(group_id.clone()),
                None => NotSet,
            },
            name: Set(self.name.clone()),
            unit: Set(self.unit.clone()),
            placeholder: Set(self.placeholder.clone()),
            editable: Set(self.editable),
            required: Set(self.required),
            is_key: Set(self.key),
            option_rule: Set(self.option.clone()),
            description: Set(self.description.clone()),
            created_at: NotSet,
            updated_at: NotSet,
        };
        let record = self.catalog.attributes().save(active).await?;
        *self = Self::from_record(&self.catalog, record);
        Ok(())
    }
}
