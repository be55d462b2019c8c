//! Postal-code resolution to regional baseline profiles.

pub mod resolver;
pub mod table;

pub use resolver::{HttpResolver, LocationResolver, StaticResolver};
pub use table::{all_cities, lookup_city, state_baseline};
