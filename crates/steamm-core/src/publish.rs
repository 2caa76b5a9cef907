//! Published coin extraction.
//!
//! After the coin package is published, binding it to a bonding curve needs
//! three things from the publish response: the `TreasuryCap` object, the
//! `CoinMetadata` object, and the coin type they are parameterized over.
//! Unlike event interpretation this step is required for the next request,
//! so missing pieces are errors.

use anyhow::{anyhow, Context, Result};
use pump_steamm_types::type_parsing::type_argument;
use pump_steamm_types::{RawObjectChange, RawTransactionResult};
use serde::{Deserialize, Serialize};

const TREASURY_CAP: &str = "TreasuryCap";
const COIN_METADATA: &str = "CoinMetadata";

/// Objects created by publishing a coin package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedCoin {
    pub treasury_cap_id: String,
    pub metadata_id: String,
    /// Taken verbatim from the TreasuryCap's type argument.
    pub coin_type: String,
}

/// Locate the TreasuryCap, CoinMetadata and coin type in a publish response.
pub fn extract_published_coin(raw: &RawTransactionResult) -> Result<PublishedCoin> {
    let changes = raw
        .object_changes
        .as_deref()
        .ok_or_else(|| anyhow!("Object changes not found in transaction result"))?;

    let treasury = find_created(changes, TREASURY_CAP)
        .ok_or_else(|| anyhow!("TreasuryCap object change not found"))?;
    let metadata = find_created(changes, COIN_METADATA)
        .ok_or_else(|| anyhow!("CoinMetadata object change not found"))?;

    let treasury_type = treasury.object_type.as_deref().unwrap_or_default();
    let coin_type = type_argument(treasury_type)
        .with_context(|| format!("TreasuryCap type '{}' has no type argument", treasury_type))?;

    let published = PublishedCoin {
        treasury_cap_id: object_id(treasury, TREASURY_CAP)?,
        metadata_id: object_id(metadata, COIN_METADATA)?,
        coin_type: coin_type.to_string(),
    };
    tracing::debug!(
        treasury_cap = %published.treasury_cap_id,
        metadata = %published.metadata_id,
        coin_type = %published.coin_type,
        "extracted published coin"
    );
    Ok(published)
}

fn find_created<'a>(changes: &'a [RawObjectChange], needle: &str) -> Option<&'a RawObjectChange> {
    changes.iter().find(|change| {
        change.is_created()
            && change
                .object_type
                .as_deref()
                .is_some_and(|t| t.contains(needle))
    })
}

fn object_id(change: &RawObjectChange, what: &str) -> Result<String> {
    change
        .object_id
        .clone()
        .ok_or_else(|| anyhow!("{} object change has no objectId", what))
}
