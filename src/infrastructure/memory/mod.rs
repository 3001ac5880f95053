//! In-process storage backend.
//!
//! Used for tests and for running the service without PostgreSQL
//! (`STORAGE=memory`). Data lives only as long as the process.

mod repositories;
mod store;

pub use repositories::MemoryHealth;
pub use store::MemoryStore;
