//! `probe-core` — wait for a deployed program to prove it is alive.
//!
//! ```text
//! Anchor.toml ──manifest::resolve──▶ ProgramId
//!                                       │
//!                                       ▼
//!                  ReadinessPoller<L: LedgerQuery>  ← PollConfig
//!                                       │
//!                   ┌───────────────────┴──────────────────┐
//!                   ▼                                      ▼
//!              ProbeReport                     ProbeError::Timeout
//! ```
//!
//! The ledger backend is abstract; `solana-ledger` provides the JSON-RPC
//! implementation used by the `wait-for-program` binary.

pub mod config;
pub mod error;
pub mod ledger;
pub mod manifest;
pub mod poller;
pub mod types;

pub use config::{PollConfig, ProbeConfig};
pub use error::{ProbeError, Result};
pub use ledger::LedgerQuery;
pub use poller::{Attempt, MarkerMatch, ProbeReport, ReadinessPoller};
pub use types::{ActivityRecord, Commitment, ProgramId, Signature};
