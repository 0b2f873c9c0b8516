use crate::config::{default_config_toml, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

/// Writes the default configuration file into `dir`.
pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, default_config_toml())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        init_config_in(temp.path(), false).unwrap();
        let err = init_config_in(temp.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(init_config_in(temp.path(), true).is_ok());
    }
}
