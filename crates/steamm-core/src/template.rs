//! Coin module bytecode, patched from a compiled template.
//!
//! The template is a one-time-witness coin module `template::TEMPLATE` whose
//! `init` calls `coin::create_currency` with four `vector<u8>` constants
//! (symbol, name, description, icon URL). Patching renames the module and
//! struct identifiers and swaps those constants, leaving every other table
//! untouched.

use anyhow::{anyhow, Context, Result};
use base64::Engine;
use move_binary_format::file_format::{CompiledModule, SignatureToken};
use move_core_types::identifier::Identifier;

use crate::requests::CoinTemplate;

/// Compiled `template::TEMPLATE` coin module (bytecode version 6).
const COIN_TEMPLATE_BASE64: &str = "oRzrCwYAAAAKAQAMAgweAyonBFEIBVlMB6UBywEI8AJgBtADXQqtBAUMsgQoABABCwIGAhECEgITAAICAAEBBwEAAAIADAEAAQIDDAEAAQQEAgAFBQcAAAkAAQABDwUGAQACBwgJAQIDDAUBAQwDDQ0BAQwEDgoLAAUKAwQAAQQCBwQMAwICCAAHCAQAAQsCAQgAAQoCAQgFAQkAAQsBAQkAAQgABwkAAgoCCgIKAgsBAQgFBwgEAgsDAQkACwIBCQABBggEAQUBCwMBCAACCQAFDENvaW5NZXRhZGF0YQZPcHRpb24IVEVNUExBVEULVHJlYXN1cnlDYXAJVHhDb250ZXh0A1VybARjb2luD2NyZWF0ZV9jdXJyZW5jeQtkdW1teV9maWVsZARpbml0FW5ld191bnNhZmVfZnJvbV9ieXRlcwZvcHRpb24TcHVibGljX3NoYXJlX29iamVjdA9wdWJsaWNfdHJhbnNmZXIGc2VuZGVyBHNvbWUIdGVtcGxhdGUIdHJhbnNmZXIKdHhfY29udGV4dAN1cmwAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAICAQkKAgUEVE1QTAoCDg1UZW1wbGF0ZSBDb2luCgIaGVRlbXBsYXRlIENvaW4gRGVzY3JpcHRpb24KAiEgaHR0cHM6Ly9leGFtcGxlLmNvbS90ZW1wbGF0ZS5wbmcAAgEIAQAAAAACEgsABwAHAQcCBwMHBBEGOAAKATgBDAILAS4RBTgCCwI4AwIA";

const TEMPLATE_MODULE: &str = "template";
const TEMPLATE_STRUCT: &str = "TEMPLATE";
const TEMPLATE_SYMBOL: &str = "TMPL";
const TEMPLATE_NAME: &str = "Template Coin";
const TEMPLATE_DESCRIPTION: &str = "Template Coin Description";
const TEMPLATE_ICON_URL: &str = "https://example.com/template.png";

/// The unpatched template module.
pub fn template_module() -> Result<CompiledModule> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(COIN_TEMPLATE_BASE64)
        .context("Failed to decode coin template")?;
    CompiledModule::deserialize_with_defaults(&bytes).context("Failed to deserialize coin template")
}

impl CoinTemplate {
    /// Produce the coin module bytecode for this template.
    ///
    /// Fails when the derived module or struct name is not a legal Move
    /// identifier, since such a module cannot be published.
    pub fn patch(&self) -> Result<Vec<u8>> {
        let mut module = template_module()?;

        for ident in module.identifiers.iter_mut() {
            let replacement = match ident.as_str() {
                TEMPLATE_MODULE => &self.identifiers.module_name,
                TEMPLATE_STRUCT => &self.identifiers.struct_name,
                _ => continue,
            };
            *ident = Identifier::new(replacement.as_str())
                .with_context(|| format!("'{}' is not a valid Move identifier", replacement))?;
        }

        let replacements = [
            (TEMPLATE_SYMBOL, self.symbol.as_str()),
            (TEMPLATE_NAME, self.name.as_str()),
            (TEMPLATE_DESCRIPTION, self.description.as_str()),
            (TEMPLATE_ICON_URL, self.icon_url.as_str()),
        ]
        .iter()
        .map(|(old, new)| -> Result<(Vec<u8>, Vec<u8>)> {
            Ok((bcs::to_bytes(old)?, bcs::to_bytes(new)?))
        })
        .collect::<Result<Vec<_>>>()?;

        let byte_vector = SignatureToken::Vector(Box::new(SignatureToken::U8));
        let mut patched = 0;
        for constant in module.constant_pool.iter_mut() {
            if constant.type_ != byte_vector {
                continue;
            }
            if let Some((_, new)) = replacements.iter().find(|(old, _)| *old == constant.data) {
                constant.data = new.clone();
                patched += 1;
            }
        }
        tracing::debug!(
            module = %self.identifiers.module_name,
            constants = patched,
            "patched coin template"
        );

        let mut bytes = Vec::new();
        module
            .serialize_with_version(module.version, &mut bytes)
            .map_err(|e| {
                anyhow!(
                    "Failed to serialize coin module {}: {}",
                    self.identifiers.module_name,
                    e
                )
            })?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::{plan_create, CreateTokenRequest};

    const PKG: &str = "0xdd718c698ebfb995e2ca740fd5c9ac625fe748b0a5e1e76db3ee629641688881";
    const REGISTRY: &str = "0x7cd97809c61e369a592901d0b1c34520342e55325742420beae271d031c193f6";

    fn coin_template(symbol: &str, custom_type: Option<&str>) -> CoinTemplate {
        plan_create(
            PKG,
            REGISTRY,
            &CreateTokenRequest {
                symbol: symbol.into(),
                custom_type: custom_type.map(String::from),
                icon_url: Some("https://cdn.example/my.png".into()),
                sender: "0xa11ce".into(),
            },
        )
        .unwrap()
    }

    fn byte_constants(module: &CompiledModule) -> Vec<String> {
        module
            .constant_pool
            .iter()
            .filter(|c| c.type_ == SignatureToken::Vector(Box::new(SignatureToken::U8)))
            .map(|c| bcs::from_bytes::<String>(&c.data).unwrap())
            .collect()
    }

    #[test]
    fn test_template_has_placeholders() {
        let module = template_module().unwrap();
        assert_eq!(module.self_id().name().as_str(), "template");
        assert_eq!(
            byte_constants(&module),
            vec![
                TEMPLATE_SYMBOL,
                TEMPLATE_NAME,
                TEMPLATE_DESCRIPTION,
                TEMPLATE_ICON_URL
            ]
        );
    }

    #[test]
    fn test_patch_renames_and_rewrites_constants() {
        let template = coin_template("My Coin", None);
        let bytes = template.patch().unwrap();
        let module = CompiledModule::deserialize_with_defaults(&bytes).unwrap();

        assert_eq!(module.self_id().name().as_str(), "my_coin");
        let struct_names: Vec<&str> = module
            .struct_handles
            .iter()
            .map(|h| module.identifier_at(h.name).as_str())
            .collect();
        assert!(struct_names.contains(&"MY_COIN"));
        assert!(!module
            .identifiers
            .iter()
            .any(|i| i.as_str() == TEMPLATE_STRUCT || i.as_str() == TEMPLATE_MODULE));

        assert_eq!(
            byte_constants(&module),
            vec![
                "My Coin",
                "Token My Coin",
                "Pump Steamm Token",
                "https://cdn.example/my.png"
            ]
        );
    }

    #[test]
    fn test_patch_uses_custom_type_and_empty_icon() {
        let mut template = coin_template("XYZ", Some("0xdead::beefMod::CoolStruct"));
        template.icon_url.clear();
        let module = CompiledModule::deserialize_with_defaults(&template.patch().unwrap()).unwrap();
        assert_eq!(module.self_id().name().as_str(), "beefMod");
        assert!(module.identifiers.iter().any(|i| i.as_str() == "CoolStruct"));
        assert_eq!(byte_constants(&module)[3], "");
    }

    #[test]
    fn test_patch_rejects_illegal_identifier() {
        let err = coin_template("9lives", None).patch().unwrap_err();
        // identifiers are sorted, so the struct name is checked first
        assert_eq!(err.to_string(), "'9LIVES' is not a valid Move identifier");
    }
}
