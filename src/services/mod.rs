// Service exports
pub mod store;

pub use store::{Store, StoreError};
