//! Curves command - the local log of known bonding curves

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use pump_steamm_core::{CurveRecord, RecordSource};
use pump_steamm_types::encoding::parse_address;
use pump_steamm_types::CoinType;

use super::{output, CliContext};

#[derive(Parser, Debug)]
pub struct CurvesCmd {
    #[command(subcommand)]
    pub command: CurvesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CurvesSubcommand {
    /// List known curves
    List,

    /// Show one curve
    Show { curve_id: String },

    /// Add a curve by hand
    Add {
        curve_id: String,

        /// Coin type "address::module::Struct"
        #[arg(long)]
        coin_type: Option<String>,
    },
}

impl CurvesCmd {
    pub fn execute(&self, ctx: &CliContext, json_output: bool) -> Result<()> {
        let log = ctx.curve_log();
        match &self.command {
            CurvesSubcommand::List => {
                let curves = log.list()?;
                if json_output {
                    return output::print_json(&curves, Vec::new());
                }
                if curves.is_empty() {
                    println!("No known curves ({})", log.path().display());
                }
                for record in &curves {
                    print_record(record);
                }
                Ok(())
            }
            CurvesSubcommand::Show { curve_id } => {
                let record = log
                    .get(curve_id)?
                    .ok_or_else(|| anyhow!("Unknown bonding curve '{}'", curve_id))?;
                if json_output {
                    return output::print_json(&record, Vec::new());
                }
                print_record(&record);
                Ok(())
            }
            CurvesSubcommand::Add {
                curve_id,
                coin_type,
            } => {
                parse_address(curve_id, "bonding curve ID")?;
                let coin_type = coin_type
                    .as_deref()
                    .map(|t| t.parse::<CoinType>().map_err(anyhow::Error::msg))
                    .transpose()?;
                let record = CurveRecord::new(
                    curve_id,
                    coin_type.map(|t| t.to_string()),
                    RecordSource::Manual,
                );
                log.append(&record)?;
                if json_output {
                    return output::print_json(&record, Vec::new());
                }
                println!("Added curve {}", record.curve_id);
                Ok(())
            }
        }
    }
}

fn print_record(record: &CurveRecord) {
    println!(
        "\x1b[36m{}\x1b[0m  {}  {}",
        record.curve_id,
        record.coin_type.as_deref().unwrap_or("-"),
        record.recorded_at.format("%Y-%m-%d %H:%M:%S")
    );
}
