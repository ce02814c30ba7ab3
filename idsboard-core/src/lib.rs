pub mod action_log;
pub mod analyzer;
pub mod export;
mod services;
pub mod store;

pub use services::*;
pub use store::{DocumentFilter, DocumentStore, StoreHealth, StoredDocument};
