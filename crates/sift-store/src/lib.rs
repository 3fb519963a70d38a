//! Sift named filter store.
//!
//! Keyed persistence of validated filter trees: the in-memory library value,
//! the injected persistence port, a sled-backed production port, and the
//! store facade that re-normalizes before every save.

pub mod error;
pub mod library;
pub mod port;
pub mod sled_port;
pub mod store;

pub use error::Error;
pub use library::{FilterLibrary, NamedFilter, SaveMode};
pub use port::{LibraryPort, MemoryPort};
pub use sled_port::SledPort;
pub use store::NamedFilterStore;
