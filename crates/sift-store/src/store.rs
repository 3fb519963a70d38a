//! Named filter store facade.

use tracing::debug;

use sift_expr::{normalize_node, FilterNode};

use crate::error::Error;
use crate::library::{FilterLibrary, SaveMode};
use crate::port::LibraryPort;

/// Keyed persistence of validated filter trees.
///
/// Every operation is one load-modify-persist of the whole library value
/// against the injected port. Filters are re-normalized before persisting,
/// so a tree with a semantic defect (an empty value set, say) never reaches
/// storage.
pub struct NamedFilterStore<P> {
    port: P,
}

impl<P: LibraryPort> NamedFilterStore<P> {
    /// Create a store over a persistence port.
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Save a filter under a name.
    ///
    /// `SaveMode::Upsert` overwrites an existing entry; `SaveMode::CreateOnly`
    /// fails with `DuplicateName` instead. The stored tree is the normalized
    /// form of `filter`.
    pub fn save(&self, name: &str, filter: &FilterNode, mode: SaveMode) -> Result<(), Error> {
        let canonical = normalize_node(filter).map_err(Error::Invalid)?;

        let mut library = self.port.load()?;
        library.insert(name, canonical, mode)?;
        library.revision += 1;
        self.port.persist(&library)?;

        debug!(name, revision = library.revision, "saved named filter");
        Ok(())
    }

    /// Load the filter saved under a name.
    pub fn load(&self, name: &str) -> Result<FilterNode, Error> {
        let library = self.port.load()?;
        library
            .get(name)
            .map(|entry| entry.filter.clone())
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Delete the filter saved under a name.
    ///
    /// Deleting an absent name is a no-op, not an error, and does not touch
    /// the persisted library.
    pub fn delete(&self, name: &str) -> Result<(), Error> {
        let mut library = self.port.load()?;
        if !library.remove(name) {
            return Ok(());
        }
        library.revision += 1;
        self.port.persist(&library)?;

        debug!(name, revision = library.revision, "deleted named filter");
        Ok(())
    }

    /// All saved names, sorted.
    pub fn names(&self) -> Result<Vec<String>, Error> {
        Ok(self.port.load()?.names())
    }

    /// The library's current revision counter.
    pub fn revision(&self) -> Result<u64, Error> {
        Ok(self.port.load()?.revision)
    }
}
