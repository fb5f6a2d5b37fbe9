//! Weekly series persistence

pub mod error;
pub mod weekly_store;

pub use error::StoreError;
pub use weekly_store::{JsonFileStore, MemoryStore, WeeklyStore};
