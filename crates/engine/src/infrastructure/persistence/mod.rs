//! Persistence adapters for [`AdventureStore`](crate::infrastructure::ports::AdventureStore).

pub mod envelope;
pub mod memory;
pub mod sqlite;

pub use memory::InMemoryAdventureStore;
pub use sqlite::SqliteAdventureStore;
