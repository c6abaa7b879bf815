use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{self, AtomicU64};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::{Error, SignalTable};

/// Process-lifetime cache of parsed tables, keyed by resolved file path.
///
/// Entries are never invalidated; files are assumed static for the session.
/// Loading happens outside the map's shard lock, so two concurrent first
/// loads of one file both parse it and the last insert wins.
#[derive(Default)]
pub struct TableCache {
    tables: DashMap<PathBuf, Arc<SignalTable>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<Arc<SignalTable>> {
        self.tables.get(path).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, path: PathBuf, table: Arc<SignalTable>) -> Arc<SignalTable> {
        trace!(?path, "caching table");
        self.tables.insert(path, table.clone());
        table
    }

    /// Returns the cached table for `path`, or runs `load` and caches its
    /// result. Failed loads are not cached.
    pub fn get_or_try_load(
        &self,
        path: &Path,
        load: impl FnOnce(&Path) -> Result<SignalTable, Error>,
    ) -> Result<Arc<SignalTable>, Error> {
        if let Some(table) = self.get(path) {
            self.hits.fetch_add(1, atomic::Ordering::Relaxed);
            debug!(?path, "table cache hit");
            return Ok(table);
        }
        self.misses.fetch_add(1, atomic::Ordering::Relaxed);
        let table = load(path)?;
        Ok(self.insert(path.to_path_buf(), Arc::new(table)))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(atomic::Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(atomic::Ordering::Relaxed)
    }
}
