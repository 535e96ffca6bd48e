//! Provides database interaction functionalities.
//!
//! The [`Store`] trait is the seam the menu actions talk to. `postgres` implements it
//! with `sqlx`; tests use the in-memory `memory` store.

#[cfg(test)]
pub mod memory;
mod postgres;
mod store;

pub use postgres::*;
pub use store::*;
