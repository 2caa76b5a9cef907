//! Core logic for the pump-steamm bonding-curve launcher.
//!
//! - [`interpret`] - turn a wallet's transaction result into [`DomainFacts`]
//! - [`identifiers`] - derive the module/struct names of a new coin type
//! - [`publish`] - pull the TreasuryCap, CoinMetadata and coin type out of a publish response
//! - [`requests`] - plan the create, bind, buy and sell transactions
//! - [`template`] - patch the coin template bytecode for a new token
//! - [`amounts`] - convert between 10^9 fixed-point integers and decimal text
//! - [`curve_log`] - local log of known curves
//! - [`response`] - JSON envelope for command output

pub mod amounts;
pub mod curve_log;
pub mod identifiers;
pub mod interpret;
pub mod publish;
pub mod requests;
pub mod response;
pub mod template;

pub use amounts::{format_balance, format_narrative, parse_amount};
pub use curve_log::{CurveLog, CurveRecord, RecordSource};
pub use identifiers::{derive, IdentifierPair};
pub use interpret::{interpret, interpret_str, DomainFacts, InterpretError};
pub use publish::{extract_published_coin, PublishedCoin};
pub use requests::{
    plan_bind, plan_buy, plan_create, plan_sell, CoinTemplate, CreateTokenRequest, CurveTarget,
    TransactionPlan,
};
pub use response::CommandResponse;
