use std::path::Path;

use anyhow::Result;
use tracing::info;

use foundry_core::AppConfig;

/// Print the effective configuration, or write it to `path`
pub fn run(config: &AppConfig, path: &Path, write: bool) -> Result<()> {
    if write {
        config.save_to(path)?;
        info!("Wrote configuration to {}", path.display());
        println!("Wrote {}", path.display());
    } else {
        println!("# {}\n", path.display());
        print!("{}", config.to_toml()?);
    }
    Ok(())
}
