//! Shared types for the pump-steamm workspace.
//!
//! This crate owns the decode boundary for the loosely-shaped JSON a wallet
//! hands back after signing and executing a transaction, plus the request
//! types the front-end builds before submission.
//!
//! ## Transaction Types
//!
//! The [`transaction`] module contains the raw response and request types:
//! - [`RawTransactionResult`](transaction::RawTransactionResult) - Response of unknown shape, decoded totally
//! - [`EffectsSource`](transaction::EffectsSource) - Which form the `effects` field arrived in
//! - [`PtbCommand`](transaction::PtbCommand) - A command in a programmable transaction block

pub mod encoding;
pub mod env_utils;
pub mod transaction;
pub mod type_parsing;

// Re-export commonly used transaction types at crate root
pub use transaction::{
    EffectsSource, PtbArgument, PtbCommand, RawEvent, RawObjectChange, RawTransactionResult,
    TransactionInput,
};
pub use type_parsing::CoinType;

/// Fixed-point scale shared by every SUI and token amount in event payloads.
pub const AMOUNT_DECIMALS: u32 = 9;

/// `10^AMOUNT_DECIMALS`, the number of base units in one whole SUI or token.
pub const AMOUNT_SCALE: u64 = 1_000_000_000;
