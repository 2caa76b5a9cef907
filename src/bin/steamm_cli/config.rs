//! Config command - show or persist the effective configuration

use anyhow::Result;
use clap::Parser;
use pump_steamm::config::{Config, CONFIG_FILE};
use serde::Serialize;
use std::path::PathBuf;

use super::{output, CliContext};

#[derive(Parser, Debug)]
pub struct ConfigCmd {
    /// Write the effective configuration to <home>/config.json
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, Serialize)]
struct ConfigOutput<'a> {
    home: PathBuf,
    config_file: PathBuf,
    config: &'a Config,
    written: bool,
}

impl ConfigCmd {
    pub fn execute(&self, ctx: &CliContext, json_output: bool) -> Result<()> {
        let config_file = if self.write {
            ctx.config.save(&ctx.home)?
        } else {
            ctx.home.join(CONFIG_FILE)
        };

        let out = ConfigOutput {
            home: ctx.home.clone(),
            config_file,
            config: &ctx.config,
            written: self.write,
        };

        if json_output {
            return output::print_json(&out, Vec::new());
        }
        println!("Home:            {}", out.home.display());
        println!(
            "Config file:     {}{}",
            out.config_file.display(),
            if out.written { " (written)" } else { "" }
        );
        println!("Package ID:      {}", ctx.config.package_id);
        println!("Registry ID:     {}", ctx.config.registry_id);
        println!("Log level:       {}", ctx.config.log_level);
        println!("Bind gas budget: {} MIST", ctx.config.bind_gas_budget);
        Ok(())
    }
}
