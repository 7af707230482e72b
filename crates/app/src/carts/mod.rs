//! Carts

pub mod errors;
pub mod flag;
pub mod persistence;
mod store;

pub use errors::{CartStoreError, PersistenceError};
pub use flag::CheckoutFlag;
pub use store::CartStore;
