//! # Data Models
//!
//! SeaORM entity models backing the catalog tables. These are storage
//! records; the domain entities callers work with live in [`crate::catalog`].

pub mod attribute;
pub mod attribute_group;
pub mod classification;
pub mod object_model;

pub use attribute::Entity as Attribute;
pub use attribute_group::Entity as AttributeGroup;
pub use classification::Entity as Classification;
pub use object_model::Entity as ObjectModel;
