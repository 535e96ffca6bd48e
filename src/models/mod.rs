//! Defines the data structures and models used throughout the application.
//!
//! This covers the rows read from the three relations, the joined listing rows shown by
//! the view actions, and the payloads written by the add actions.

mod org;

pub use org::*;
