//! Reference backend adapters

mod memory;

pub use memory::{MemoryCache, MemoryPersistence};
