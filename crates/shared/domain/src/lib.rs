//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The wire representation of these types lives in the proto crate.

pub mod constants;
pub mod user;

pub use constants::*;
pub use user::{password_never_changed, User};
