//! Classification seeding functionality
//!
//! This module provides functionality to seed the classifications table with
//! the built-in namespaces every CMDB starts with.

use anyhow::Result;
use sea_orm::{DatabaseConnection, NotSet, Set};
use std::sync::Arc;

use crate::models::classification;
use crate::repositories::ClassificationRepository;

/// Built-in classifications as `(id, name, icon)`.
pub const BUILTIN_CLASSIFICATIONS: &[(&str, &str, &str)] = &[
    ("bk_host_manage", "Host", "icon-cc-host"),
    ("bk_biz_topo", "Business Topology", "icon-cc-business"),
    ("bk_organization", "Organization", "icon-cc-organization"),
    ("bk_network", "Network", "icon-cc-network-equipment"),
    ("bk_uncategorized", "Uncategorized", "icon-cc-default"),
];

/// Seeds the classifications table with the built-in classifications
///
/// Classifications that already exist are left untouched, so operators can
/// rename or re-icon them without a restart undoing it.
///
/// # Arguments
///
/// * `db` - Database connection
///
/// # Returns
///
/// Returns the number of classifications created
pub async fn seed_classifications(db: &DatabaseConnection) -> Result<usize> {
    let repo = ClassificationRepository::new(Arc::new(db.clone()));
    let mut created = 0;

    for (id, name, icon) in BUILTIN_CLASSIFICATIONS {
        match repo.find_by_id(id).await {
            Ok(Some(_)) => {
                log::info!("Classification '{}' already exists, skipping", id);
                continue;
            }
            Ok(None) => {
                log::info!("Creating classification: {}", id);

                let active = classification::ActiveModel {
                    id: Set(id.to_string()),
                    name: Set(name.to_string()),
                    icon: Set(icon.to_string()),
                    created_at: NotSet,
                    updated_at: NotSet,
                };

                if let Err(e) = repo.upsert(active).await {
                    log::error!("Failed to create classification '{}': {}", id, e);
                    return Err(e.into());
                }
                created += 1;
            }
            Err(e) => {
                log::error!("Error checking if classification '{}' exists: {}", id, e);
                return Err(e.into());
            }
        }
    }

    log::info!(
        "Classification seeding completed ({} created, {} total)",
        created,
        BUILTIN_CLASSIFICATIONS.len()
    );
    Ok(created)
}
