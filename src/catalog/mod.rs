//! # Catalog
//!
//! The domain layer callers work with. A [`Catalog`] handle carries the
//! connection pool, the tenant (supplier account) and the iterator page size;
//! every entity it hands out keeps a clone of the handle, so factories and
//! finders on a [`Classification`], [`Model`] or [`Group`] need no further
//! context.
//!
//! ```no_run
//! use cmdb_catalog::catalog::{Catalog, Saver};
//! use std::sync::Arc;
//!
//! # async fn run(db: sea_orm::DatabaseConnection) -> cmdb_catalog::error::CatalogResult<()> {
//! let catalog = Catalog::new(Arc::new(db), "0");
//! let host = catalog.get_classification("bk_host_manage").await?;
//!
//! let mut model = host.create_model();
//! model.set_id("switch").set_name("Switch");
//! model.save().await?;
//!
//! let mut ports = model.create_attribute();
//! ports.set_id("port_count").set_name("Ports").set_unit("ports");
//! ports.save().await?;
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod classification;
pub mod group;
pub mod iterator;
pub mod model;
pub mod saver;
pub mod validation;

pub use attribute::Attribute;
pub use classification::Classification;
pub use group::Group;
pub use iterator::{
    AttributeIterator, CatalogIterator, ClassificationIterator, FromRecord, GroupIterator,
    ModelIterator,
};
pub use model::Model;
pub use saver::Saver;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::condition::Condition;
use crate::config::{CatalogConfig, MAX_CATALOG_PAGE_SIZE};
use crate::error::{CatalogError, CatalogResult};
use crate::repositories::{
    AttributeGroupRepository, AttributeRepository, ClassificationRepository,
    ObjectModelRepository,
};

/// Rows fetched per round trip when the caller does not pick a page size.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Handle to the catalog of one tenant.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Catalog {
    db: Arc<DatabaseConnection>,
    supplier_account: String,
    page_size: u64,
    classifications: ClassificationRepository,
    models: ObjectModelRepository,
    groups: AttributeGroupRepository,
    attributes: AttributeRepository,
}

impl Catalog {
    pub fn new(db: Arc<DatabaseConnection>, supplier_account: impl Into<String>) -> Self {
        Self {
            classifications: ClassificationRepository::new(db.clone()),
            models: ObjectModelRepository::new(db.clone()),
            groups: AttributeGroupRepository::new(db.clone()),
            attributes: AttributeRepository::new(db.clone()),
            db,
            supplier_account: supplier_account.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Builds a handle for the tenant and page size named in `config`.
    pub fn from_config(db: Arc<DatabaseConnection>, config: &CatalogConfig) -> Self {
        Self::new(db, config.supplier_account.clone()).with_page_size(config.page_size)
    }

    /// Overrides the iterator page size, clamped to
    /// `1..=MAX_CATALOG_PAGE_SIZE` rows.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.clamp(1, MAX_CATALOG_PAGE_SIZE);
        self
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn supplier_account(&self) -> &str {
        &self.supplier_account
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the same catalog scoped to another tenant.
    pub fn for_supplier_account(&self, supplier_account: impl Into<String>) -> Self {
        Self {
            supplier_account: supplier_account.into(),
            ..self.clone()
        }
    }

    pub(crate) fn classifications(&self) -> &ClassificationRepository {
        &self.classifications
    }

    pub(crate) fn models(&self) -> &ObjectModelRepository {
        &self.models
    }

    pub(crate) fn groups(&self) -> &AttributeGroupRepository {
        &self.groups
    }

    pub(crate) fn attributes(&self) -> &AttributeRepository {
        &self.attributes
    }

    /// An unsaved classification.
    pub fn new_classification(&self) -> Classification {
        Classification::new(self.clone())
    }

    pub async fn get_classification(&self, id: &str) -> CatalogResult<Classification> {
        let record = self
            .classifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("classification", id))?;
        Ok(Classification::from_record(self, record))
    }

    /// Classifications whose name contains `name`, ignoring ASCII case.
    pub async fn find_classifications_like_name(
        &self,
        name: &str,
    ) -> CatalogResult<ClassificationIterator> {
        let select = self.classifications.select_like_name(name);
        CatalogIterator::open(self, select).await
    }

    pub async fn find_classifications_by_condition(
        &self,
        condition: &Condition,
    ) -> CatalogResult<ClassificationIterator> {
        let select = self.classifications.select_by_condition(condition)?;
        CatalogIterator::open(self, select).await
    }

    /// Looks a model up by ID within this catalog's tenant.
    pub async fn get_model(&self, id: &str) -> CatalogResult<Model> {
        let record = self
            .models
            .find_by_id(&self.supplier_account, id)
            .await?
            .ok_or_else(|| CatalogError::not_found("model", id))?;
        Ok(Model::from_record(self, record))
    }

    /// Models of this tenant, across classifications, whose name contains
    /// `name`.
    pub async fn find_models_like_name(&self, name: &str) -> CatalogResult<ModelIterator> {
        let select = self
            .models
            .select_like_name(&self.supplier_account, None, name);
        CatalogIterator::open(self, select).await
    }

    /// Models of this tenant, across classifications, matching `condition`.
    pub async fn find_models_by_condition(
        &self,
        condition: &Condition,
    ) -> CatalogResult<ModelIterator> {
        let select = self
            .models
            .select_by_condition(&self.supplier_account, None, condition)?;
        CatalogIterator::open(self, select).await
    }
}
