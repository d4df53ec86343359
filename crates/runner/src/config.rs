//! Runner configuration

use serde::{Deserialize, Serialize};

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Maven invocation settings
    pub maven: MavenConfig,

    /// Scenario discovery settings
    pub discovery: DiscoveryConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            maven: MavenConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// Maven-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MavenConfig {
    /// Path to the Maven binary
    pub binary_path: Option<String>,

    /// System property selecting the scenario to run
    pub karate_option: String,

    /// Report directory name under `target/`
    pub reports_dir: String,
}

impl Default for MavenConfig {
    fn default() -> Self {
        Self {
            binary_path: None, // Will use mvn / mvn.cmd from PATH
            karate_option: "karate.options".to_string(),
            reports_dir: "karate-reports".to_string(),
        }
    }
}

impl MavenConfig {
    /// Get the Maven command name
    pub fn maven_command(&self) -> String {
        self.binary_path.clone().unwrap_or_else(|| {
            if cfg!(windows) {
                "mvn.cmd".to_string()
            } else {
                "mvn".to_string()
            }
        })
    }
}

/// Scenario discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Nested directory names marking a scenario root
    pub marker: Vec<String>,

    /// Conventional feature file name under the marker path
    pub feature_name: String,

    /// Category label for scenarios directly under the resource base
    pub default_category: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            marker: vec!["karateTests".to_string(), "UITests".to_string()],
            feature_name: "cotizador.feature".to_string(),
            default_category: "Testes Disponíveis".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from file
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_karate_conventions() {
        let config = RunnerConfig::default();
        assert_eq!(config.discovery.marker, vec!["karateTests", "UITests"]);
        assert_eq!(config.discovery.feature_name, "cotizador.feature");
        assert_eq!(config.maven.karate_option, "karate.options");
        assert_eq!(config.maven.reports_dir, "karate-reports");
    }

    #[test]
    fn binary_path_overrides_platform_command() {
        let config = MavenConfig {
            binary_path: Some("/opt/maven/bin/mvn".to_string()),
            ..Default::default()
        };
        assert_eq!(config.maven_command(), "/opt/maven/bin/mvn");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = RunnerConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: RunnerConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.discovery.default_category, config.discovery.default_category);
        assert_eq!(back.maven.reports_dir, config.maven.reports_dir);
    }
}
