use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// True when `path` should be read and written as JSON rather than YAML.
pub fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    /// Loads from `path`, picking JSON or YAML by extension. A missing file
    /// yields `Default`.
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if is_json_path(path) {
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display()))
        } else {
            serde_norway::from_str(&contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display()))
        }
    }

    /// Writes to `path`, creating parent directories as needed.
    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let contents = if is_json_path(path) {
            serde_json::to_string_pretty(self).context("failed to serialize JSON")?
        } else {
            serde_norway::to_string(self).context("failed to serialize YAML")?
        };
        fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestData {
        value: String,
        count: u32,
    }

    impl Persistable for TestData {}

    fn sample() -> TestData {
        TestData {
            value: "hello".to_string(),
            count: 42,
        }
    }

    #[test]
    fn test_is_json_path() {
        assert!(is_json_path(Path::new("a/b.json")));
        assert!(is_json_path(Path::new("b.JSON")));
        assert!(!is_json_path(Path::new("b.yaml")));
        assert!(!is_json_path(Path::new("noext")));
    }

    #[test]
    fn test_load_from_returns_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let loaded = TestData::load_from(&tmp.path().join("missing.yaml")).unwrap();
        assert_eq!(loaded, TestData::default());
    }

    #[test]
    fn test_yaml_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.yaml");
        sample().save_to(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("value: hello"));
        assert_eq!(TestData::load_from(&path).unwrap(), sample());
    }

    #[test]
    fn test_json_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        sample().save_to(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"value\": \"hello\""));
        assert_eq!(TestData::load_from(&path).unwrap(), sample());
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("data.yaml");
        sample().save_to(&path).unwrap();
        assert_eq!(TestData::load_from(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_from_reports_parse_errors_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = TestData::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
