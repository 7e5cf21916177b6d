use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BaconError, Result};
use crate::feed::FeedOptions;

/**
 * Settings for the `bacon` command, read from an optional YAML file.
 *
 * Every field has a default, so a file only needs the keys it changes, e.g.
 *
 * ```yaml
 * dataset: data/imdb.txt
 * center: Kevin Bacon
 * lenient: true
 * ```
 */
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: Option<PathBuf>,
    pub center: String,
    pub separator: char,
    pub lenient: bool,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub top: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            center: "Kevin Bacon".to_string(),
            separator: '|',
            lenient: false,
            log_level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            top: 10,
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|e| BaconError::at_path(e, path))?;
        Self::from_yaml(&text)
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            separator: self.separator,
            lenient: self.lenient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_yaml("center: Tom Hanks\nlenient: true\n")
            .unwrap();
        assert_eq!(config.center, "Tom Hanks");
        assert!(config.lenient);
        assert_eq!(config.separator, '|');
        assert_eq!(config.top, 10);
        assert_eq!(config.dataset, None);
    }

    #[test]
    fn empty_mapping_is_default() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn bad_types_are_config_errors() {
        assert!(matches!(
            Config::from_yaml("top: many"),
            Err(BaconError::Config(_))
        ));
    }
}
