//! CLI command implementations.

pub mod check;
pub mod exec;
pub mod print;
pub mod read;

use anyhow::{Context, Result};
use envchain_environment::{Settings, Source, VariableMap, merge};

use crate::args::EnvFiles;
use crate::paths::expand_patterns;

/// Expand the `-e` patterns and merge the matching files in order.
pub fn load_variables(env: &EnvFiles, settings: &Settings) -> Result<VariableMap> {
    let paths = expand_patterns(&env.patterns)?;
    tracing::info!(files = paths.len(), "Merging definition files");

    let map = merge(paths.iter().map(Source::path), settings)
        .context("Failed to resolve variables")?;
    tracing::info!(variables = map.len(), "Resolved variables");
    Ok(map)
}
