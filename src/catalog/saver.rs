//! Create-or-update persistence shared by every catalog entity.

use async_trait::async_trait;

use crate::error::CatalogResult;

/// Writes an entity to the backend.
///
/// An entity without an ID is given a fresh one; an entity with an ID
/// creates or overwrites the record under that ID within its scope. Last
/// write wins. On success the entity reflects the stored record and reports
/// itself as persisted; on failure it is left unchanged.
#[async_trait]
pub trait Saver {
    async fn save(&mut self) -> CatalogResult<()>;
}
