//! SeaORM entities for the four tables.
//!
//! Relations are declared in both directions so queries can join along them;
//! the models themselves only carry foreign-key columns.

pub mod client;
pub mod order;
pub mod order_detail;
pub mod product;
