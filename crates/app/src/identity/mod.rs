//! Buyer identity

mod errors;
mod models;
mod resolver;
pub mod supabase;

pub use errors::*;
pub use models::*;
pub use resolver::*;
pub use supabase::{SupabaseClient, SupabaseConfig};
