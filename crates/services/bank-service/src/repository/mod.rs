//! Repository layer for data access.

pub mod entities;
mod store;

pub use store::{CreateUserParams, SqlStore, Store, UpdateUserParams};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockStore;
