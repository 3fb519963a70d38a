//! Persistence port.
//!
//! The store is written against an injected key-value port rather than a
//! concrete backend, so it is testable without real storage. The production
//! binding is [`crate::sled_port::SledPort`].

use parking_lot::Mutex;

use crate::error::Error;
use crate::library::FilterLibrary;

/// Durable storage for the whole library value.
///
/// `persist` replaces the entire stored value; a subsequent `load` returns
/// exactly what was last persisted.
pub trait LibraryPort {
    /// Load the stored library, or an empty one if nothing was persisted yet.
    fn load(&self) -> Result<FilterLibrary, Error>;

    /// Replace the stored library.
    fn persist(&self, library: &FilterLibrary) -> Result<(), Error>;
}

/// In-memory port for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPort {
    inner: Mutex<FilterLibrary>,
}

impl MemoryPort {
    /// Create an empty in-memory port.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LibraryPort for MemoryPort {
    fn load(&self) -> Result<FilterLibrary, Error> {
        Ok(self.inner.lock().clone())
    }

    fn persist(&self, library: &FilterLibrary) -> Result<(), Error> {
        *self.inner.lock() = library.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::SaveMode;
    use sift_expr::FilterNode;

    #[test]
    fn test_memory_port_roundtrip() {
        let port = MemoryPort::new();
        assert!(port.load().unwrap().is_empty());

        let mut library = FilterLibrary::new();
        library
            .insert("mine", FilterNode::empty("col"), SaveMode::Upsert)
            .unwrap();
        port.persist(&library).unwrap();

        assert_eq!(port.load().unwrap(), library);
    }
}
