//! Cart store, checkout handoff and return handling for the TRGC storefront.

pub mod carts;
pub mod checkout;
pub mod config;
pub mod context;
pub mod identity;
pub mod observability;
pub mod returns;
pub mod storage;
