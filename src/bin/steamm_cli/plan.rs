//! Plan command - build transactions for the wallet to sign
//!
//! Plans are printed, never submitted. Token creation is two plans: `create`
//! (publish the patched coin package) and, once that lands, `bind` with the
//! publish result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pump_steamm_core::{
    extract_published_coin, plan_bind, plan_buy, plan_create, plan_sell, CoinTemplate,
    CreateTokenRequest, CurveTarget, PublishedCoin, TransactionPlan,
};
use pump_steamm_types::RawTransactionResult;
use serde::Serialize;
use std::path::PathBuf;

use super::{output, read_input, CliContext};

#[derive(Parser, Debug)]
pub struct PlanCmd {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PlanSubcommand {
    /// Validate a new token and plan the coin package publish
    Create(PlanCreateCmd),

    /// Bind a published coin to a new bonding curve
    Bind(PlanBindCmd),

    /// Buy tokens with SUI
    Buy(PlanBuyCmd),

    /// Sell tokens for SUI
    Sell(PlanSellCmd),
}

#[derive(Parser, Debug)]
pub struct PlanCreateCmd {
    /// Token symbol
    pub symbol: String,

    /// Custom type "address::module::Struct" to take identifiers from
    #[arg(long)]
    pub custom_type: Option<String>,

    /// Icon URL for the coin metadata
    #[arg(long)]
    pub icon_url: Option<String>,

    /// Wallet address that publishes and receives the UpgradeCap
    #[arg(long)]
    pub sender: String,

    /// Coin module bytecode to publish instead of the patched template
    #[arg(long = "module", value_name = "FILE")]
    pub modules: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct PlanBindCmd {
    /// Publish transaction result JSON file, or - for stdin
    #[arg(default_value = "-")]
    pub publish_result: PathBuf,

    /// Gas budget in MIST (default from config: 100000000 = 0.1 SUI)
    #[arg(long)]
    pub gas_budget: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct PlanBuyCmd {
    /// Bonding curve object ID
    #[arg(long)]
    pub curve: String,

    /// Coin type of the curve's token (default: from the curve log)
    #[arg(long)]
    pub coin_type: Option<String>,

    /// SUI to pay, as a decimal, e.g. 1.5
    pub amount: String,
}

#[derive(Parser, Debug)]
pub struct PlanSellCmd {
    /// Bonding curve object ID
    #[arg(long)]
    pub curve: String,

    /// Coin type of the curve's token (default: from the curve log)
    #[arg(long)]
    pub coin_type: Option<String>,

    /// Token coin object to split the sold amount from
    #[arg(long = "coin")]
    pub token_coin: String,

    /// Tokens to sell, as a decimal
    pub amount: String,
}

#[derive(Debug, Serialize)]
struct CreateOutput {
    template: CoinTemplate,
    publish: TransactionPlan,
}

#[derive(Debug, Serialize)]
struct BindOutput {
    coin: PublishedCoin,
    plan: TransactionPlan,
}

impl PlanCmd {
    pub fn execute(&self, ctx: &CliContext, json_output: bool) -> Result<()> {
        match &self.command {
            PlanSubcommand::Create(cmd) => cmd.execute(ctx, json_output),
            PlanSubcommand::Bind(cmd) => cmd.execute(ctx, json_output),
            PlanSubcommand::Buy(cmd) => {
                let target = curve_target(ctx, &cmd.curve, cmd.coin_type.as_deref())?;
                print_plan(&plan_buy(&target, &cmd.amount)?, json_output)
            }
            PlanSubcommand::Sell(cmd) => {
                let target = curve_target(ctx, &cmd.curve, cmd.coin_type.as_deref())?;
                print_plan(
                    &plan_sell(&target, &cmd.token_coin, &cmd.amount)?,
                    json_output,
                )
            }
        }
    }
}

impl PlanCreateCmd {
    fn execute(&self, ctx: &CliContext, json_output: bool) -> Result<()> {
        let request = CreateTokenRequest {
            symbol: self.symbol.clone(),
            custom_type: self.custom_type.clone(),
            icon_url: self.icon_url.clone(),
            sender: self.sender.clone(),
        };
        let template = plan_create(&ctx.config.package_id, &ctx.config.registry_id, &request)?;

        let modules = self
            .modules
            .iter()
            .map(|path| {
                std::fs::read(path)
                    .with_context(|| format!("Failed to read module {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?;
        let modules = if modules.is_empty() {
            vec![template.patch()?]
        } else {
            modules
        };
        let publish = template.publish_plan(&modules);

        let warnings: Vec<String> = template
            .identifiers
            .illegal_parts()
            .into_iter()
            .map(|(part, name)| format!("{} name '{}' is not a valid Move identifier", part, name))
            .collect();

        let out = CreateOutput { template, publish };
        if json_output {
            return output::print_json(&out, warnings);
        }

        let t = &out.template;
        println!("Token:  {} ({})", t.name, t.symbol);
        println!("Type:   {}", t.identifiers.placeholder_type());
        if !t.icon_url.is_empty() {
            println!("Icon:   {}", t.icon_url);
        }
        print!("\n{}", output::format_plan(&out.publish));
        output::print_warnings(&warnings);
        Ok(())
    }
}

impl PlanBindCmd {
    fn execute(&self, ctx: &CliContext, json_output: bool) -> Result<()> {
        let text = read_input(&self.publish_result)?;
        let raw = RawTransactionResult::from_json_str(&text)?;
        let coin = extract_published_coin(&raw).context("Failed to extract published coin")?;
        let plan = plan_bind(
            &ctx.config.package_id,
            &ctx.config.registry_id,
            &coin,
            self.gas_budget.unwrap_or(ctx.config.bind_gas_budget),
        )?;

        let out = BindOutput { coin, plan };
        if json_output {
            return output::print_json(&out, Vec::new());
        }
        println!("Coin type: {}", out.coin.coin_type);
        print!("{}", output::format_plan(&out.plan));
        Ok(())
    }
}

/// The curve to trade against; a missing coin type is looked up in the log.
fn curve_target(ctx: &CliContext, curve: &str, coin_type: Option<&str>) -> Result<CurveTarget> {
    let coin_type = match coin_type {
        Some(t) => t.to_string(),
        None => ctx
            .curve_log()
            .get(curve)?
            .and_then(|record| record.coin_type)
            .unwrap_or_default(),
    };
    Ok(CurveTarget {
        package_id: ctx.config.package_id.clone(),
        curve_id: curve.to_string(),
        coin_type,
    })
}

fn print_plan(plan: &TransactionPlan, json_output: bool) -> Result<()> {
    if json_output {
        return output::print_json(plan, Vec::new());
    }
    print!("{}", output::format_plan(plan));
    Ok(())
}
