//! Per-calendar metadata.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CalQueryError, CalQueryResult};

/// The parts of `.caldir/config.toml` calquery reads. Other keys
/// (remote provider settings and the like) are ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CalendarConfig {
    /// Display title; the directory name is used when absent
    pub name: Option<String>,
}

impl CalendarConfig {
    /// Load config from .caldir/config.toml
    pub fn load(calendar_dir: &Path) -> CalQueryResult<Self> {
        let path = calendar_dir.join(".caldir/config.toml");

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: CalendarConfig =
                toml::from_str(&content).map_err(|e| CalQueryError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_name_and_ignores_remote() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".caldir")).unwrap();
        std::fs::write(
            dir.path().join(".caldir/config.toml"),
            "name = \"Work\"\n\n[remote]\nprovider = \"google\"\ngoogle_account = \"me@example.com\"\n",
        )
        .unwrap();

        let config = CalendarConfig::load(dir.path()).unwrap();
        assert_eq!(config.name.as_deref(), Some("Work"));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalendarConfig::load(dir.path()).unwrap();
        assert_eq!(config.name, None);
    }
}
