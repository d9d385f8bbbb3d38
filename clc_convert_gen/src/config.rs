use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clc_convert::prelude::*;
use serde::Deserialize;

pub const INT64_ENV: &str = "CLC_CONVERT_INT64";
pub const FP64_ENV: &str = "CLC_CONVERT_FP64";

/// Settings for one run of the generator.
///
/// Layered lowest to highest: cargo-feature defaults, a JSON config file,
/// the `CLC_CONVERT_*` environment variables, then command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    pub precision: PrecisionPolicy,
    pub output: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

impl GenConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = var(INT64_ENV) {
            self.precision.int64 = parse_extension(INT64_ENV, &v)?;
        }
        if let Some(v) = var(FP64_ENV) {
            self.precision.fp64 = parse_extension(FP64_ENV, &v)?;
        }
        Ok(())
    }
}

fn parse_extension(name: &str, value: &str) -> Result<Extension> {
    value
        .trim()
        .parse::<Extension>()
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("invalid value for {}", name))
}
