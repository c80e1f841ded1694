//! `solana-ledger` — the two JSON-RPC calls the program probe needs.
//!
//! [`RpcClient`] speaks `getSignaturesForAddress` and `getTransaction` to a
//! Solana node and implements [`probe_core::LedgerQuery`] on top of them.

pub mod client;
pub mod error;
pub mod types;

pub use client::RpcClient;
pub use error::RpcError;
pub use types::{SignatureInfo, TransactionInfo, TransactionMeta};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, RpcError>;
