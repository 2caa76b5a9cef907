//! Amount command - 10^9 fixed-point conversions

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use pump_steamm_core::amounts::{format_balance_str, format_narrative, parse_amount};
use serde_json::json;

use super::output;

#[derive(Parser, Debug)]
pub struct AmountCmd {
    #[command(subcommand)]
    pub command: AmountSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AmountSubcommand {
    /// Base units to decimal text, e.g. 1500000000 -> 1.500000000
    Format {
        base_units: String,

        /// Trim trailing zeros, as in result messages
        #[arg(long)]
        narrative: bool,
    },

    /// Decimal text to base units, truncating past 9 decimals
    Parse { amount: String },
}

impl AmountCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let (result, text) = match &self.command {
            AmountSubcommand::Format {
                base_units,
                narrative,
            } => {
                let formatted = if *narrative {
                    format_narrative(base_units)
                } else {
                    format_balance_str(base_units)
                        .ok_or_else(|| anyhow!("Invalid base-unit amount '{}'", base_units))?
                };
                (json!({ "base_units": base_units, "amount": formatted }), formatted)
            }
            AmountSubcommand::Parse { amount } => {
                let units = parse_amount(amount)?;
                (
                    json!({ "amount": amount, "base_units": units.to_string() }),
                    units.to_string(),
                )
            }
        };

        if json_output {
            return output::print_json(&result, Vec::new());
        }
        println!("{}", text);
        Ok(())
    }
}
