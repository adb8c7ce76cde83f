//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated definitions of the `pb` package:
//! - `User`: public wire representation of a bank user
//! - `BasicBank`: the banking service (users, login, email verification)

/// Banking service definitions.
pub mod pb {
    tonic::include_proto!("pb");
}

// Re-export commonly used items
pub use pb::basic_bank_client::BasicBankClient;
pub use pb::basic_bank_server::{BasicBank, BasicBankServer};
