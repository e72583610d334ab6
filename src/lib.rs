//! # CMDB Metadata Catalog
//!
//! This library provides the metadata catalog of a configuration-management
//! database: the runtime-defined schema (classification, model, attribute
//! group, attribute) describing the assets the CMDB tracks, together with
//! its persistence layer and query conditions.

pub mod catalog;
pub mod condition;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod telemetry;
pub use migration;
