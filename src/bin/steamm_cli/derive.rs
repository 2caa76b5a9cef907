//! Derive command - module and struct names for a new coin type

use anyhow::Result;
use clap::Parser;
use pump_steamm_core::{derive, IdentifierPair};
use serde::Serialize;

use super::output;

#[derive(Parser, Debug)]
pub struct DeriveCmd {
    /// Token symbol, e.g. "My Coin"
    pub symbol: String,

    /// Custom type "address::module::Struct"; the address part is ignored
    #[arg(long)]
    pub custom_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeriveOutput {
    #[serde(flatten)]
    identifiers: IdentifierPair,
    placeholder_type: String,
}

impl DeriveCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let identifiers = derive(&self.symbol, self.custom_type.as_deref());
        let warnings: Vec<String> = identifiers
            .illegal_parts()
            .into_iter()
            .map(|(part, name)| format!("{} name '{}' is not a valid Move identifier", part, name))
            .collect();

        let out = DeriveOutput {
            placeholder_type: identifiers.placeholder_type(),
            identifiers,
        };

        if json_output {
            return output::print_json(&out, warnings);
        }
        println!("Module: {}", out.identifiers.module_name);
        println!("Struct: {}", out.identifiers.struct_name);
        println!("Type:   {}", out.placeholder_type);
        output::print_warnings(&warnings);
        Ok(())
    }
}
