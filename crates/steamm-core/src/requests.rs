//! Transaction request planning.
//!
//! Builds the programmable transaction blocks the front-end hands to the
//! wallet. All calls go to fixed entry points of the external
//! `bonding_curve` module; nothing here prices or validates curve state.
//!
//! Token creation is a two-step flow: publish a coin package patched from a
//! template ([`CoinTemplate`]), then bind the resulting TreasuryCap and
//! CoinMetadata to a new curve ([`plan_bind`]).

use anyhow::{bail, Context, Result};
use base64::Engine;
use pump_steamm_types::encoding::{normalize_address, parse_address};
use pump_steamm_types::{CoinType, PtbArgument, PtbCommand, TransactionInput};
use serde::{Deserialize, Serialize};

use crate::amounts::parse_amount;
use crate::identifiers::{derive, IdentifierPair};
use crate::publish::PublishedCoin;

pub const BONDING_CURVE_MODULE: &str = "bonding_curve";
pub const BIND_FUNCTION: &str = "bind_token_to_curve_entry";
pub const BUY_FUNCTION: &str = "buy";
pub const SELL_FUNCTION: &str = "sell";

/// Gas budget for the bind call (100M MIST = 0.1 SUI).
pub const DEFAULT_BIND_GAS_BUDGET: u64 = 100_000_000;

/// Description baked into every coin minted through the launcher.
pub const COIN_DESCRIPTION: &str = "Pump Steamm Token";

/// Packages every coin module links against: std and sui framework.
const PUBLISH_DEPENDENCIES: [&str; 2] = ["0x1", "0x2"];

/// A transaction block ready for the signer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_budget: Option<u64>,
    pub inputs: Vec<TransactionInput>,
    pub commands: Vec<PtbCommand>,
}

impl TransactionPlan {
    pub fn object(&mut self, object_id: &str) -> PtbArgument {
        self.input(TransactionInput::Object {
            object_id: object_id.trim().to_string(),
        })
    }

    pub fn pure(&mut self, type_tag: &str, value: impl ToString) -> PtbArgument {
        self.input(TransactionInput::Pure {
            type_tag: type_tag.to_string(),
            value: value.to_string(),
        })
    }

    fn input(&mut self, input: TransactionInput) -> PtbArgument {
        self.inputs.push(input);
        PtbArgument::Input {
            index: (self.inputs.len() - 1) as u16,
        }
    }

    /// Append a command and return a reference to its result.
    pub fn command(&mut self, command: PtbCommand) -> PtbArgument {
        self.commands.push(command);
        PtbArgument::Result {
            index: (self.commands.len() - 1) as u16,
        }
    }

    /// Split one coin of `amount` base units off `coin`.
    pub fn split_coin(&mut self, coin: PtbArgument, amount: u64) -> PtbArgument {
        let amount = self.pure("u64", amount);
        match self.command(PtbCommand::SplitCoins {
            coin,
            amounts: vec![amount],
        }) {
            PtbArgument::Result { index } => PtbArgument::NestedResult {
                index,
                result_index: 0,
            },
            other => other,
        }
    }

    /// Call `package::bonding_curve::function<coin_type>(args)`.
    pub fn curve_call(
        &mut self,
        package_id: &str,
        function: &str,
        coin_type: &str,
        arguments: Vec<PtbArgument>,
    ) -> PtbArgument {
        self.command(PtbCommand::MoveCall {
            package: package_id.trim().to_string(),
            module: BONDING_CURVE_MODULE.to_string(),
            function: function.to_string(),
            type_arguments: vec![coin_type.trim().to_string()],
            arguments,
        })
    }
}

/// Everything the template patcher needs to produce a coin module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinTemplate {
    #[serde(flatten)]
    pub identifiers: IdentifierPair,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub dependencies: Vec<String>,
    /// Receives the package's UpgradeCap.
    pub sender: String,
}

/// Form input for a new token.
#[derive(Debug, Clone, Default)]
pub struct CreateTokenRequest {
    pub symbol: String,
    pub custom_type: Option<String>,
    pub icon_url: Option<String>,
    pub sender: String,
}

/// Validate the creation form and derive the coin template.
///
/// The package and registry are only needed by the later bind step, but the
/// flow refuses to start without them.
pub fn plan_create(
    package_id: &str,
    registry_id: &str,
    request: &CreateTokenRequest,
) -> Result<CoinTemplate> {
    let symbol = request.symbol.trim();
    if package_id.trim().is_empty() || registry_id.trim().is_empty() || symbol.is_empty() {
        bail!("Please fill in all required fields: Package ID, Registry ID, and Token Symbol");
    }
    parse_address(package_id, "package ID")?;
    parse_address(registry_id, "registry ID")?;
    parse_address(&request.sender, "sender address").context("No connected wallet")?;

    let identifiers = derive(symbol, request.custom_type.as_deref());
    tracing::info!(
        identifier = %identifiers.placeholder_type(),
        "creating token"
    );

    Ok(CoinTemplate {
        identifiers,
        symbol: symbol.to_string(),
        name: format!("Token {}", symbol),
        description: COIN_DESCRIPTION.to_string(),
        icon_url: request.icon_url.clone().unwrap_or_default(),
        dependencies: PUBLISH_DEPENDENCIES
            .iter()
            .map(|d| normalize_address(d))
            .collect::<Result<_>>()?,
        sender: request.sender.trim().to_string(),
    })
}

impl CoinTemplate {
    /// Publish the patched modules and hand the UpgradeCap to the sender.
    pub fn publish_plan(&self, modules: &[Vec<u8>]) -> TransactionPlan {
        let engine = base64::engine::general_purpose::STANDARD;
        let mut plan = TransactionPlan {
            sender: Some(self.sender.clone()),
            ..Default::default()
        };
        let upgrade_cap = plan.command(PtbCommand::Publish {
            modules: modules.iter().map(|m| engine.encode(m)).collect(),
            dependencies: self.dependencies.clone(),
        });
        let recipient = plan.pure("address", &self.sender);
        plan.command(PtbCommand::TransferObjects {
            objects: vec![upgrade_cap],
            address: recipient,
        });
        plan
    }
}

/// Bind a freshly published coin to a new bonding curve.
pub fn plan_bind(
    package_id: &str,
    registry_id: &str,
    coin: &PublishedCoin,
    gas_budget: u64,
) -> Result<TransactionPlan> {
    parse_address(package_id, "package ID")?;
    parse_address(registry_id, "registry ID")?;
    require_coin_type(&coin.coin_type)?;

    let mut plan = TransactionPlan {
        gas_budget: Some(gas_budget),
        ..Default::default()
    };
    let registry = plan.object(registry_id);
    let treasury = plan.object(&coin.treasury_cap_id);
    let metadata = plan.object(&coin.metadata_id);
    plan.curve_call(
        package_id,
        BIND_FUNCTION,
        &coin.coin_type,
        vec![registry, treasury, metadata],
    );
    Ok(plan)
}

/// The curve a trade goes against.
#[derive(Debug, Clone, Default)]
pub struct CurveTarget {
    pub package_id: String,
    pub curve_id: String,
    pub coin_type: String,
}

/// Pay `amount` SUI (decimal text) from gas into the curve.
pub fn plan_buy(target: &CurveTarget, amount: &str) -> Result<TransactionPlan> {
    let units = trade_amount(target, amount, "buying")?;

    let mut plan = TransactionPlan::default();
    let payment = plan.split_coin(PtbArgument::GasCoin, units);
    let curve = plan.object(&target.curve_id);
    plan.curve_call(
        &target.package_id,
        BUY_FUNCTION,
        &target.coin_type,
        vec![curve, payment],
    );
    Ok(plan)
}

/// Sell `amount` tokens (decimal text) split off `token_coin_id`.
pub fn plan_sell(
    target: &CurveTarget,
    token_coin_id: &str,
    amount: &str,
) -> Result<TransactionPlan> {
    if token_coin_id.trim().is_empty() {
        bail!("Please fill all fields for selling tokens");
    }
    let units = trade_amount(target, amount, "selling")?;
    parse_address(token_coin_id, "token coin ID")?;

    let mut plan = TransactionPlan::default();
    let coin = plan.object(token_coin_id);
    let tokens = plan.split_coin(coin, units);
    let curve = plan.object(&target.curve_id);
    plan.curve_call(
        &target.package_id,
        SELL_FUNCTION,
        &target.coin_type,
        vec![curve, tokens],
    );
    Ok(plan)
}

fn trade_amount(target: &CurveTarget, amount: &str, action: &str) -> Result<u64> {
    if target.package_id.trim().is_empty()
        || target.curve_id.trim().is_empty()
        || amount.trim().is_empty()
    {
        bail!("Please fill all fields for {} tokens", action);
    }
    let units = parse_amount(amount)?;
    if units == 0 {
        bail!("Please fill all fields for {} tokens", action);
    }
    require_coin_type(&target.coin_type)?;
    parse_address(&target.package_id, "package ID")?;
    parse_address(&target.curve_id, "bonding curve ID")?;
    Ok(units)
}

fn require_coin_type(coin_type: &str) -> Result<()> {
    if coin_type.trim().is_empty() {
        bail!("Coin type is not set. Please enter a valid coin type.");
    }
    coin_type
        .trim()
        .parse::<CoinType>()
        .map_err(anyhow::Error::msg)?;
    Ok(())
}
