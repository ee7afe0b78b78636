//! Shared types, errors and collaborator ports

pub mod dry_run;
pub mod errors;
pub mod price_cache;
pub mod traits;
pub mod types;
