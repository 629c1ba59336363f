pub mod catalog;
pub mod intake;
pub mod models;
pub mod phone;
pub mod schema;
pub mod store;

pub use store::{CatalogStore, MemoryStore, PgStore, StoreError};
