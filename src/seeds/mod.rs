//! Database seeding functionality
//!
//! This module provides functionality to seed the database with the data a
//! fresh catalog ships with.

pub mod classification;

pub use classification::{BUILTIN_CLASSIFICATIONS, seed_classifications};
