//! Sled-backed persistence port.

use sled::{Db, Tree};

use crate::error::Error;
use crate::library::FilterLibrary;
use crate::port::LibraryPort;

/// Tree name for the filter library.
const LIBRARY_TREE: &str = "filters:library";

/// Key for the serialized library value.
const LIBRARY_KEY: &[u8] = b"library";

/// Durable library storage on a sled tree.
///
/// The whole library is stored as one JSON value under one key, so each
/// persist is a single atomic replacement, flushed before returning.
pub struct SledPort {
    tree: Tree,
}

impl SledPort {
    /// Open or create the library tree on the given sled database.
    pub fn open(db: &Db) -> Result<Self, Error> {
        let tree = db.open_tree(LIBRARY_TREE)?;
        Ok(Self { tree })
    }
}

impl LibraryPort for SledPort {
    fn load(&self) -> Result<FilterLibrary, Error> {
        match self.tree.get(LIBRARY_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(FilterLibrary::new()),
        }
    }

    fn persist(&self, library: &FilterLibrary) -> Result<(), Error> {
        let bytes = serde_json::to_vec(library)?;
        self.tree.insert(LIBRARY_KEY, bytes)?;
        self.tree.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::SaveMode;
    use sift_expr::FilterNode;

    #[test]
    fn test_sled_port_roundtrip() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let port = SledPort::open(&db).unwrap();
        assert!(port.load().unwrap().is_empty());

        let mut library = FilterLibrary::new();
        library.revision = 1;
        library
            .insert(
                "topics",
                FilterNode::is_one_of("topic", vec!["economy".into()]),
                SaveMode::Upsert,
            )
            .unwrap();
        port.persist(&library).unwrap();

        assert_eq!(port.load().unwrap(), library);
    }
}
