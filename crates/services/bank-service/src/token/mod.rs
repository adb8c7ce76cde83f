//! Token issuance and verification.
//!
//! A token maker is derived once from a symmetric key and is then shared
//! read-only by every request handler.

mod jwt_maker;
mod maker;
mod payload;

pub use jwt_maker::JwtMaker;
pub use maker::{TokenError, TokenMaker};
pub use payload::Payload;
