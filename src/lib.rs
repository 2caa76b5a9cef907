//! pump-steamm: command-line companion for the Steamm bonding-curve launcher
//!
//! Interprets the transaction results a wallet returns, derives identifiers
//! for new coin types, and plans the create, bind, buy and sell transactions.
//! The logic lives in the workspace crates; this crate adds configuration and
//! the `pump-steamm` binary.

pub mod config;

pub use pump_steamm_core;
pub use pump_steamm_types;
