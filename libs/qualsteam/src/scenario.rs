//! Scenario catalog
//!
//! The catalog is fixed at startup, either from the built-in set of four
//! forensic scenarios or from a TOML file, and is never mutated afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

pub const DEFAULT_SITE: &str = "Zydus LifeSciences";
pub const DEFAULT_SOURCE: &str = "Zydus LifeSciences Site Logs";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(default = "CatalogConfig::default_site")]
    pub site: String,
    #[serde(default = "CatalogConfig::default_source")]
    pub source: String,
    #[serde(rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

impl CatalogConfig {
    fn default_site() -> String {
        DEFAULT_SITE.to_string()
    }

    fn default_source() -> String {
        DEFAULT_SOURCE.to_string()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            site: Self::default_site(),
            source: Self::default_source(),
            scenarios: (1..=4)
                .map(|i| Scenario {
                    name: format!("Scenario {i}"),
                    path: PathBuf::from(format!("data/df_{i}_cleaned.csv")),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    site: String,
    source: String,
    root: PathBuf,
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Builds a catalog whose relative file references resolve against `root`.
    pub fn new(config: CatalogConfig, root: impl Into<PathBuf>) -> Result<Self, Error> {
        let CatalogConfig {
            site,
            source,
            scenarios,
        } = config;
        for (i, scenario) in scenarios.iter().enumerate() {
            if scenarios[..i].iter().any(|s| s.name == scenario.name) {
                return Err(Error::DuplicateScenario(scenario.name.clone()));
            }
        }
        Ok(Self {
            site,
            source,
            root: root.into(),
            scenarios,
        })
    }

    pub fn builtin(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::from_config_unchecked(CatalogConfig::default())
        }
    }

    pub fn from_toml(text: &str, root: impl Into<PathBuf>) -> Result<Self, Error> {
        let config: CatalogConfig = toml::from_str(text)?;
        Self::new(config, root)
    }

    pub fn from_file(path: impl AsRef<Path>, root: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!(?path, "reading scenario catalog");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text, root)
    }

    fn from_config_unchecked(config: CatalogConfig) -> Self {
        Self {
            site: config.site,
            source: config.source,
            root: PathBuf::new(),
            scenarios: config.scenarios,
        }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Resolves a scenario name to the file it is backed by.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, Error> {
        let scenario = self
            .get(name)
            .ok_or_else(|| Error::UnknownScenario(name.to_string()))?;
        Ok(self.root.join(&scenario.path))
    }
}
