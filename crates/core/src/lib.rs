//! TRGC
//!
//! Domain types for the TRGC members-only drop storefront: line items, the shopper's cart and
//! its derived totals, and the read-only drop display logic (countdown, stock, drop state).
//!
//! Nothing in this crate performs IO. Persistence, the external checkout and identity lookups
//! live in `trgc-app`.

pub mod cart;
pub mod drops;
pub mod items;
pub mod prices;
pub mod summary;
