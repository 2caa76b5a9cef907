//! Interpret and publish-info commands - read a wallet's transaction result

use anyhow::{Context, Result};
use clap::Parser;
use pump_steamm_core::interpret::interpret_partial;
use pump_steamm_core::{extract_published_coin, CurveRecord, DomainFacts};
use pump_steamm_types::{EffectsSource, RawTransactionResult};
use serde::Serialize;
use std::path::PathBuf;

use super::{output, read_input, CliContext};

#[derive(Parser, Debug)]
pub struct InterpretCmd {
    /// Transaction result JSON file, or - for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Append a newly created curve to the curve log
    #[arg(long)]
    pub record: bool,
}

#[derive(Debug, Serialize)]
struct InterpretOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<String>,
    effects: EffectsSource,
    facts: DomainFacts,
    #[serde(skip_serializing_if = "Option::is_none")]
    headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recorded: Option<CurveRecord>,
}

impl InterpretCmd {
    pub fn execute(&self, ctx: &CliContext, json_output: bool) -> Result<()> {
        let text = read_input(&self.input)?;
        let mut warnings = Vec::new();

        let raw = match RawTransactionResult::from_json_str(&text) {
            Ok(raw) => raw,
            Err(e) => {
                warnings.push(format!("{:#}", e));
                RawTransactionResult::default()
            }
        };
        if let EffectsSource::Undecodable { error } = &raw.effects {
            warnings.push(format!("Effects could not be decoded: {}", error));
        }

        let (facts, stopped) = interpret_partial(&raw);
        if let Some(reason) = stopped {
            warnings.push(format!("Interpretation stopped early: {}", reason));
        }

        let recorded = if self.record {
            ctx.curve_log()
                .record_facts(&facts, raw.digest.as_deref())
                .context("Failed to record curve")?
        } else {
            None
        };

        let out = InterpretOutput {
            digest: raw.digest.clone(),
            effects: raw.effects.clone(),
            headline: facts.headline(),
            facts,
            recorded,
        };

        if json_output {
            return output::print_json(&out, warnings);
        }

        match &out.headline {
            Some(headline) => println!("\x1b[32m✓ {}\x1b[0m", headline),
            None => println!("No bonding curve events found"),
        }
        if let Some(digest) = &out.digest {
            println!("Digest: {}", digest);
        }
        if let Some(id) = &out.facts.curve_id {
            println!("Bonding curve: \x1b[36m{}\x1b[0m", id);
        }
        if let Some(coin_type) = &out.facts.coin_type {
            println!("Coin type: {}", coin_type);
        }
        if let Some(record) = &out.recorded {
            println!("Recorded curve {} in {}", record.curve_id, ctx.curve_log().path().display());
        }
        output::print_warnings(&warnings);
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct PublishInfoCmd {
    /// Publish transaction result JSON file, or - for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

impl PublishInfoCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let text = read_input(&self.input)?;
        let raw = RawTransactionResult::from_json_str(&text)?;
        let coin = extract_published_coin(&raw).context("Failed to extract published coin")?;

        if json_output {
            return output::print_json(&coin, Vec::new());
        }
        println!("TreasuryCap:  \x1b[36m{}\x1b[0m", coin.treasury_cap_id);
        println!("CoinMetadata: \x1b[36m{}\x1b[0m", coin.metadata_id);
        println!("Coin type:    {}", coin.coin_type);
        Ok(())
    }
}
