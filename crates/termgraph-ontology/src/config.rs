//! Configuration for ontology loading
//!
//! Controls import resolution, time limits and stub adoption.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the ontology loader
///
/// # Examples
///
/// ```
/// use termgraph_ontology::OntologyConfig;
///
/// // Default configuration (follow every import)
/// let config = OntologyConfig::default();
/// assert_eq!(config.import_depth, -1);
///
/// // Never touch imports
/// let config = OntologyConfig::offline();
/// assert!(!config.resolve_imports);
///
/// // Direct imports only
/// let config = OntologyConfig::shallow();
/// assert_eq!(config.import_depth, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyConfig {
    /// Load and merge the ontologies named in the import list
    /// Default: true
    #[serde(default = "default_resolve_imports")]
    pub resolve_imports: bool,

    /// How many import levels to descend
    /// Negative is unbounded, zero does not descend
    /// Default: -1
    #[serde(default = "default_import_depth")]
    pub import_depth: i64,

    /// Time limit handed to the parser (in seconds)
    /// Default: 60
    #[serde(default = "default_parse_timeout_secs")]
    pub parse_timeout_secs: u64,

    /// Timeout for remote fetches (in seconds)
    /// Default: 30
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Re-run adopt after stub materialization, so parents that only exist
    /// once imports are merged (or as stubs) also list their children
    /// Default: false
    #[serde(default)]
    pub adopt_stubs: bool,
}

/// Largest accepted parse or fetch timeout (one day)
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

fn default_resolve_imports() -> bool {
    true
}

fn default_import_depth() -> i64 {
    -1
}

fn default_parse_timeout_secs() -> u64 {
    60
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            resolve_imports: default_resolve_imports(),
            import_depth: default_import_depth(),
            parse_timeout_secs: default_parse_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            adopt_stubs: false,
        }
    }
}

impl OntologyConfig {
    /// Load the document only, ignoring its imports
    pub fn offline() -> Self {
        Self {
            resolve_imports: false,
            import_depth: 0,
            ..Self::default()
        }
    }

    /// Follow direct imports but not theirs
    pub fn shallow() -> Self {
        Self {
            import_depth: 1,
            ..Self::default()
        }
    }

    /// Get the parse time limit as Duration
    pub fn parse_timeout(&self) -> Duration {
        Duration::from_secs(self.parse_timeout_secs)
    }

    /// Get the fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Whether construction should descend into imports at all
    pub fn follows_imports(&self) -> bool {
        self.resolve_imports && self.import_depth != 0
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.parse_timeout_secs == 0 {
            return Err("parse_timeout_secs must be greater than 0".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than 0".to_string());
        }
        if self.parse_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(format!(
                "parse_timeout_secs must be at most {}",
                MAX_TIMEOUT_SECS
            ));
        }
        if self.fetch_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(format!(
                "fetch_timeout_secs must be at most {}",
                MAX_TIMEOUT_SECS
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OntologyConfig::default();
        assert!(config.resolve_imports);
        assert_eq!(config.import_depth, -1);
        assert_eq!(config.parse_timeout_secs, 60);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert!(!config.adopt_stubs);
        assert!(config.follows_imports());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert!(!OntologyConfig::offline().follows_imports());
        assert!(OntologyConfig::shallow().follows_imports());
        assert!(OntologyConfig::shallow().validate().is_ok());
    }

    #[test]
    fn test_zero_depth_does_not_follow() {
        let config = OntologyConfig {
            import_depth: 0,
            ..OntologyConfig::default()
        };
        assert!(!config.follows_imports());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = OntologyConfig::default();
        config.parse_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_timeouts_rejected() {
        let result = OntologyConfig::from_toml("parse_timeout_secs = 9223372036854775807");
        assert!(result.unwrap_err().contains("parse_timeout_secs"));

        let config = OntologyConfig {
            fetch_timeout_secs: MAX_TIMEOUT_SECS + 1,
            ..OntologyConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("fetch_timeout_secs"));

        let config = OntologyConfig {
            parse_timeout_secs: MAX_TIMEOUT_SECS,
            fetch_timeout_secs: MAX_TIMEOUT_SECS,
            ..OntologyConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duration_conversions() {
        let config = OntologyConfig::default();
        assert_eq!(config.parse_timeout(), Duration::from_secs(60));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = OntologyConfig::shallow();
        let toml_str = config.to_toml().unwrap();
        let parsed = OntologyConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = OntologyConfig::from_toml("import_depth = 2\nadopt_stubs = true").unwrap();
        assert_eq!(config.import_depth, 2);
        assert!(config.adopt_stubs);
        assert!(config.resolve_imports);
        assert_eq!(config.parse_timeout_secs, 60);
    }
}
