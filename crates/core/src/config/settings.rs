use crate::{
    error::{Error, Result},
    ranking::MergeStrategy,
    sources::dynamic::DEFAULT_MAX_PROTOTYPE_DEPTH,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound accepted for `runtime.max_prototype_depth`
const MAX_PROTOTYPE_DEPTH_LIMIT: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    pub ranking: RankingConfig,
    pub runtime: RuntimeConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RankingConfig {
    /// Signal of a binding in the innermost scope
    pub static_weight: f64,
    /// Signal of an own property of the inspected value
    pub dynamic_weight: f64,
    pub merge: MergeStrategy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            static_weight: 10.0,
            dynamic_weight: 10.0,
            merge: MergeStrategy::Max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RuntimeConfig {
    pub max_prototype_depth: usize,
    pub include_non_enumerable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_prototype_depth: DEFAULT_MAX_PROTOTYPE_DEPTH,
            include_non_enumerable: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ParserConfig {
    /// Treat any syntax error as a parse failure
    pub strict: bool,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (field, weight) in [
            ("ranking.static_weight", self.ranking.static_weight),
            ("ranking.dynamic_weight", self.ranking.dynamic_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::ConfigError(format!(
                    "{field} must be a non-negative number, got {weight}"
                )));
            }
        }

        if self.runtime.max_prototype_depth > MAX_PROTOTYPE_DEPTH_LIMIT {
            return Err(Error::ConfigError(format!(
                "runtime.max_prototype_depth must be at most {MAX_PROTOTYPE_DEPTH_LIMIT}, got {}",
                self.runtime.max_prototype_depth
            )));
        }

        Ok(())
    }

    /// Walk up from `start_path` looking for `.scopehint.json` or `scopehint.json`
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(".scopehint.json");
            if config_path.exists() {
                return Some(config_path);
            }

            let config_path = current.join("scopehint.json");
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// The nearest config above `start_path`, or defaults when there is none
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            ranking: RankingConfig {
                static_weight: 12.0,
                merge: MergeStrategy::Sum,
                ..Default::default()
            },
            runtime: RuntimeConfig {
                max_prototype_depth: 3,
                include_non_enumerable: true,
            },
            parser: ParserConfig { strict: true },
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        println!("Serialized config:\n{json}");

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
        assert!(json.contains("\"merge\": \"sum\""));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config =
            serde_json::from_str(r#"{ "ranking": { "merge": "MAX" }, "parser": {} }"#).unwrap();
        assert_eq!(parsed, Config::default());
        assert_eq!(parsed.ranking.static_weight, 10.0);
        assert_eq!(parsed.runtime.max_prototype_depth, DEFAULT_MAX_PROTOTYPE_DEPTH);
    }

    #[test]
    fn test_unknown_merge_strategy() {
        let err = serde_json::from_str::<Config>(r#"{ "ranking": { "merge": "product" } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("expected one of: max, sum"));
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut config = Config::default();
        config.ranking.dynamic_weight = -1.0;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let mut config = Config::default();
        config.runtime.max_prototype_depth = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert!(Config::find_config_file(&nested).is_none_or(|p| !p.starts_with(temp_dir.path())));

        let config_path = temp_dir.path().join(".scopehint.json");
        let mut config = Config::default();
        config.parser.strict = true;
        config.save_to_file(&config_path).unwrap();

        assert_eq!(Config::find_config_file(&nested), Some(config_path.clone()));
        let loaded = Config::discover(&nested).unwrap();
        assert!(loaded.parser.strict);
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scopehint.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Config::load_from_file(&path), Err(Error::ConfigError(_))));
    }
}
