use std::path::Path;

use tracing::{info, warn};

pub fn is_production() -> bool {
    dotenvy::var("ROCKET_PROFILE").unwrap_or("development".to_string()) == "production"
}

pub fn load_environment() -> anyhow::Result<()> {
    let env_files = if is_production() {
        vec!["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        vec!["config/common.env", "config/dev.env", ".secrets.env"]
    };

    for env_file in env_files {
        load_env_file(env_file)?;
    }

    Ok(())
}

fn load_env_file(path: &str) -> anyhow::Result<()> {
    if !Path::new(path).exists() {
        warn!("Warning: Environment file {} not found, skipping", path);
        return Ok(());
    }

    dotenvy::from_filename_override(path)?;
    info!("Loaded environment from: {}", path);
    Ok(())
}
