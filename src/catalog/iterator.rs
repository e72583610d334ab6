//! Lazy, paged cursors over finder results.
//!
//! A [`CatalogIterator`] owns the query it was opened with and fetches one
//! page per backend round trip. No connection is held between pages, so an
//! iterator parked in a caller never pins a pooled connection. Iterators are
//! single-pass: once exhausted or failed they stay that way.

use sea_orm::{EntityTrait, QuerySelect, Select};
use std::collections::VecDeque;

use super::Catalog;
use crate::error::{CatalogError, CatalogResult};

/// Domain entities that can be rebuilt from a stored record.
pub trait FromRecord: Sized {
    type Entity: EntityTrait;

    fn from_record(catalog: &Catalog, record: <Self::Entity as EntityTrait>::Model) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    /// More rows may be buffered or fetchable.
    Ready,
    Exhausted,
    /// The first error is replayed on every later call.
    Failed(CatalogError),
}

/// Single-pass cursor yielding persisted entities in the finder's order.
pub struct CatalogIterator<T: FromRecord> {
    catalog: Catalog,
    select: Option<Select<T::Entity>>,
    next_page: u64,
    buffer: VecDeque<<T::Entity as EntityTrait>::Model>,
    state: CursorState,
}

impl<T: FromRecord> CatalogIterator<T> {
    /// Opens the cursor and fetches its first page, so an unreachable
    /// backend is reported by the finder itself.
    pub(crate) async fn open(catalog: &Catalog, select: Select<T::Entity>) -> CatalogResult<Self> {
        let mut iter = Self {
            catalog: catalog.clone(),
            select: Some(select),
            next_page: 0,
            buffer: VecDeque::new(),
            state: CursorState::Ready,
        };
        iter.fetch_page().await?;
        Ok(iter)
    }

    /// A cursor that is exhausted from the start.
    pub(crate) fn empty(catalog: &Catalog) -> Self {
        Self {
            catalog: catalog.clone(),
            select: None,
            next_page: 0,
            buffer: VecDeque::new(),
            state: CursorState::Exhausted,
        }
    }

    /// Yields the next entity, `Ok(None)` once exhausted, or the error that
    /// failed the cursor.
    pub async fn next(&mut self) -> CatalogResult<Option<T>> {
        loop {
            match &self.state {
                CursorState::Failed(err) => return Err(err.clone()),
                CursorState::Exhausted if self.buffer.is_empty() => return Ok(None),
                _ => {}
            }

            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(T::from_record(&self.catalog, record)));
            }

            self.fetch_page().await?;
        }
    }

    /// Drains the remaining entities into a vector.
    pub async fn collect(mut self) -> CatalogResult<Vec<T>> {
        let mut out = Vec::new();
        while let Some(entity) = self.next().await? {
            out.push(entity);
        }
        Ok(out)
    }

    /// Releases the query and any buffered rows.
    pub fn close(self) {}

    /// True once every row has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted && self.buffer.is_empty()
    }

    async fn fetch_page(&mut self) -> CatalogResult<()> {
        let Some(select) = self.select.as_ref() else {
            self.state = CursorState::Exhausted;
            return Ok(());
        };

        let page_size = self.catalog.page_size();
        let result = select
            .clone()
            .offset(self.next_page.saturating_mul(page_size))
            .limit(page_size)
            .all(self.catalog.connection())
            .await;

        match result {
            Ok(rows) => {
                if (rows.len() as u64) < page_size {
                    self.state = CursorState::Exhausted;
                    self.select = None;
                }
                self.next_page += 1;
                self.buffer.extend(rows);
                Ok(())
            }
            Err(db_err) => {
                let err = CatalogError::from(db_err);
                tracing::warn!(error = %err, page = self.next_page, "Catalog iterator failed");
                self.state = CursorState::Failed(err.clone());
                self.select = None;
                self.buffer.clear();
                Err(err)
            }
        }
    }
}

impl<T: FromRecord> std::fmt::Debug for CatalogIterator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogIterator")
            .field("next_page", &self.next_page)
            .field("buffered", &self.buffer.len())
            .field("state", &self.state)
            .finish()
    }
}

pub type ClassificationIterator = CatalogIterator<super::Classification>;
pub type ModelIterator = CatalogIterator<super::Model>;
pub type GroupIterator = CatalogIterator<super::Group>;
pub type AttributeIterator = CatalogIterator<super::Attribute>;
