//! # Repository Layer
//!
//! Repositories encapsulate SeaORM operations for the catalog tables. They are
//! the only components with visibility across entities, so the cross-entity
//! invariants (one default group per model, no orphaned groups or attributes)
//! are enforced here, each write inside its own transaction.

pub mod attribute;
pub mod attribute_group;
pub mod classification;
pub mod object_model;

pub use attribute::AttributeRepository;
pub use attribute_group::AttributeGroupRepository;
pub use classification::ClassificationRepository;
pub use object_model::ObjectModelRepository;

/// Extracts a required key column from an active model.
pub(crate) fn required_key<V>(
    value: &sea_orm::ActiveValue<V>,
    field: &'static str,
) -> crate::error::CatalogResult<V>
where
    V: Into<sea_orm::Value> + Clone,
{
    value
        .clone()
        .take()
        .ok_or_else(|| crate::error::CatalogError::validation(field, "must be set"))
}
