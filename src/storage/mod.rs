pub mod memory;
pub mod postgres;
pub mod sqlite;
pub mod trait_def;

pub use memory::MemoryEventStore;
pub use postgres::PostgresEventStore;
pub use sqlite::SqliteEventStore;
pub use trait_def::{EventStore, StoreError, StoreResult};
