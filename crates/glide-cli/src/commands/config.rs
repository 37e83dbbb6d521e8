use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::info;

use glide_core::GlideConfig;

fn resolve(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(GlideConfig::config_path)
}

pub fn path(path: Option<&Path>) -> Result<()> {
    let path = resolve(path);
    let state = if path.exists() { "" } else { " (not created yet)" };
    println!("{}{}", path.display(), state);
    Ok(())
}

pub fn show(config: &GlideConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

pub fn init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve(explicit);
    if path.exists() && !force {
        bail!(
            "Configuration already exists at {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    let defaults = GlideConfig::default();
    match explicit {
        Some(_) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, defaults.to_toml_string()?)?;
        }
        None => defaults.save()?,
    }

    info!(path = %path.display(), "configuration written");
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
