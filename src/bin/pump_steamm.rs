//! pump-steamm: command-line companion for the Steamm bonding-curve launcher
//!
//! ## Features
//!
//! - **interpret**: Read a wallet's transaction result and report what happened
//! - **publish-info**: Pull the TreasuryCap, CoinMetadata and coin type out of a publish result
//! - **derive**: Derive the module and struct names for a new coin type
//! - **amount**: Convert between base units and decimal text
//! - **plan**: Build create, bind, buy and sell transactions for the wallet
//! - **curves**: Keep a local list of known bonding curves
//!
//! ## Example Usage
//!
//! ```bash
//! # What did this transaction do?
//! sui client tx-block <DIGEST> --json | pump-steamm interpret - --record
//!
//! # Identifiers for a new token
//! pump-steamm derive "My Coin"
//!
//! # Buy 1.5 SUI worth of tokens from a known curve
//! pump-steamm plan buy --curve 0xc0ffee 1.5
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod steamm_cli;

use pump_steamm::config::{home_dir, Config};
use pump_steamm_core::CommandResponse;
use steamm_cli::{
    amount::AmountCmd,
    config::ConfigCmd,
    curves::CurvesCmd,
    derive::DeriveCmd,
    interpret::{InterpretCmd, PublishInfoCmd},
    output,
    plan::PlanCmd,
    CliContext,
};

#[derive(Parser)]
#[command(
    name = "pump-steamm",
    author,
    version,
    about = "Steamm bonding-curve launcher companion",
    long_about = "Interprets bonding-curve transaction results, derives coin identifiers,\n\
                  and plans create, bind, buy and sell transactions for a wallet to sign."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Home directory for config and the curve log (default: ~/.pump-steamm)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Bonding-curve package ID (overrides config)
    #[arg(long, global = true)]
    package_id: Option<String>,

    /// Curve registry object ID (overrides config)
    #[arg(long, global = true)]
    registry_id: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a transaction result (file path or - for stdin)
    Interpret(InterpretCmd),

    /// Extract the published coin from a publish transaction result
    PublishInfo(PublishInfoCmd),

    /// Derive module and struct identifiers for a new coin type
    Derive(DeriveCmd),

    /// Convert between base units and decimal amounts
    Amount(AmountCmd),

    /// Build a transaction for the wallet to sign
    Plan(PlanCmd),

    /// List, show or add known bonding curves
    Curves(CurvesCmd),

    /// Show the effective configuration
    Config(ConfigCmd),
}

fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose {
        Level::DEBUG
    } else {
        configured.parse().unwrap_or(Level::INFO)
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, ctx: &CliContext, json: bool) -> Result<()> {
    match command {
        Commands::Interpret(cmd) => cmd.execute(ctx, json),
        Commands::PublishInfo(cmd) => cmd.execute(json),
        Commands::Derive(cmd) => cmd.execute(json),
        Commands::Amount(cmd) => cmd.execute(json),
        Commands::Plan(cmd) => cmd.execute(ctx, json),
        Commands::Curves(cmd) => cmd.execute(ctx, json),
        Commands::Config(cmd) => cmd.execute(ctx, json),
    }
}

fn main() -> Result<()> {
    let Cli {
        command,
        json,
        verbose,
        home,
        package_id,
        registry_id,
    } = Cli::parse();

    // Config errors go through the same envelope as command errors.
    let home = home_dir(home.as_deref());
    let loaded = Config::load(&home).map(|c| c.with_overrides(package_id, registry_id));
    init_logging(verbose, loaded.as_ref().map_or("info", |c| c.log_level.as_str()));

    let result = loaded.and_then(|config| {
        tracing::debug!(
            home = %home.display(),
            package = %config.package_id,
            registry = %config.registry_id,
            "loaded configuration"
        );
        run(command, &CliContext { home, config }, json)
    });

    if json {
        if let Err(err) = &result {
            output::print_response(&CommandResponse::from_error(err))?;
            std::process::exit(1);
        }
    }

    result
}
