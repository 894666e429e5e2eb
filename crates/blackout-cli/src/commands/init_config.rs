use std::path::Path;

use anyhow::{bail, Result};
use blackout_cli::config::{save_config, ScenarioConfig};

pub fn handle(out: &Path, force: bool) -> Result<()> {
    if out.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", out.display());
    }
    save_config(&ScenarioConfig::default(), out)?;
    println!("Wrote scenario config to {}", out.display());
    Ok(())
}
