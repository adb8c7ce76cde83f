//! gRPC layer - server composition, service impl and wire conversions.

mod bank_grpc;
mod converter;
mod server;

pub use converter::{convert_user, to_timestamp};
pub use server::{Server, ServerError, Stage};
