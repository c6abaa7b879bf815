use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::{Catalog, Error, SignalTable, TableCache};

/// Resolves scenarios to their files and loads them through a shared cache.
pub struct Loader {
    catalog: Catalog,
    cache: Arc<TableCache>,
}

impl Loader {
    pub fn new(catalog: Catalog, cache: Arc<TableCache>) -> Self {
        Self { catalog, cache }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache(&self) -> &Arc<TableCache> {
        &self.cache
    }

    /// Loads the table backing `scenario`.
    ///
    /// A file that cannot be opened is reported as [`Error::ResourceNotFound`].
    /// Repeated loads of a scenario, or of any scenario sharing its file,
    /// return the cached table without touching storage.
    pub fn load(&self, scenario: &str) -> Result<Arc<SignalTable>, Error> {
        let path = self.catalog.resolve(scenario)?;
        self.cache.get_or_try_load(&path, |path| {
            let start = Instant::now();
            let table = SignalTable::from_path(path).inspect_err(|err| {
                warn!(?path, %err, "failed to load scenario");
            })?;
            info!(
                scenario,
                ?path,
                rows = table.len(),
                signals = ?table.signals(),
                elapsed = ?start.elapsed(),
                "loaded scenario"
            );
            Ok(table)
        })
    }
}
