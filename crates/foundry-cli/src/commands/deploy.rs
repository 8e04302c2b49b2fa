use std::path::Path;

use anyhow::{Context, Result};

use foundry_core::{AppConfig, Deployer, HttpDeployer};

pub async fn run(config: &AppConfig, file: &Path, name: Option<&str>) -> Result<()> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let deployer = HttpDeployer::new(&config.deploy)?;
    let project_name = name.map(str::to_string).unwrap_or_else(|| deployer.project_name());

    println!("Deploying {} as {} to {}...", file.display(), project_name, deployer.endpoint());
    let deployment = deployer.deploy(&html, &project_name).await?;
    println!("Successfully deployed!\n\nURL: {}", deployment.url);
    Ok(())
}
