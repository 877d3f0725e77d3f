//! Check command implementation.

use anyhow::Result;
use envchain_environment::Settings;

use crate::args::EnvFiles;

pub fn run(env: &EnvFiles, settings: &Settings) -> Result<()> {
    let map = super::load_variables(env, settings)?;
    println!("OK: {} variables resolved", map.len());
    Ok(())
}
