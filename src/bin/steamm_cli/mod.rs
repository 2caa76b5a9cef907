//! CLI subcommand implementations for pump-steamm

pub mod amount;
pub mod config;
pub mod curves;
pub mod derive;
pub mod interpret;
pub mod output;
pub mod plan;

use anyhow::{Context, Result};
use pump_steamm::config::Config;
use pump_steamm_core::CurveLog;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Resolved home directory and configuration shared by every command.
pub struct CliContext {
    pub home: PathBuf,
    pub config: Config,
}

impl CliContext {
    pub fn curve_log(&self) -> CurveLog {
        CurveLog::in_dir(&self.home)
    }
}

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
