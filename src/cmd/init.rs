use crate::data::{Persistable, Settings};
use anyhow::{bail, Result};
use std::path::Path;

/// Writes a default settings file. Refuses to overwrite unless `force`.
pub fn run(path: &Path, force: bool) -> Result<()> {
    write_default_settings(path, force)?;
    println!("Default settings written to {}", path.display());
    Ok(())
}

pub(crate) fn write_default_settings(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Settings::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_loadable_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config").join("settings.yaml");
        write_default_settings(&path, false).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.yaml");
        fs::write(&path, "placeholder: mine\n").unwrap();
        let err = write_default_settings(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(fs::read_to_string(&path).unwrap().contains("mine"));
    }

    #[test]
    fn test_force_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{}").unwrap();
        write_default_settings(&path, true).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }
}
