//! Configuration file parsing for mutation rules

use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::MutationError;
use crate::registry;

/// Top-level configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    /// Per-mutator entries; mutators not listed run with their defaults
    #[serde(default)]
    pub mutators: BTreeMap<String, MutatorEntry>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            mutators: BTreeMap::new(),
        }
    }
}

/// Configuration of one mutator: either `Name: false` or a table
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MutatorEntry {
    Toggle(bool),
    Detailed(MutatorOptions),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutatorOptions {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub settings: MutatorSettings,
}

fn default_enabled() -> bool {
    true
}

impl MutatorEntry {
    pub fn enabled(&self) -> bool {
        match self {
            MutatorEntry::Toggle(enabled) => *enabled,
            MutatorEntry::Detailed(options) => options.enabled,
        }
    }

    pub fn settings(&self) -> MutatorSettings {
        match self {
            MutatorEntry::Toggle(_) => MutatorSettings::default(),
            MutatorEntry::Detailed(options) => options.settings.clone(),
        }
    }
}

/// Rule-specific options, keyed by lowercased option name.
///
/// Values are kept exactly as written; rules decide how to compare them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct MutatorSettings {
    values: BTreeMap<String, Value>,
}

impl From<BTreeMap<String, Value>> for MutatorSettings {
    fn from(values: BTreeMap<String, Value>) -> Self {
        values
            .into_iter()
            .fold(Self::default(), |settings, (key, value)| settings.with(&key, value))
    }
}

impl MutatorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any existing value
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_lowercase(), value.into());
        self
    }

    /// Built-in defaults overridden key by key with `overrides`
    pub fn merged(defaults: &MutatorSettings, overrides: &MutatorSettings) -> Self {
        let mut values = defaults.values.clone();
        values.extend(
            overrides
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Self { values }
    }

    /// Case-insensitive lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(&key.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, MutationError> {
        let content = std::fs::read_to_string(path).map_err(|e| MutationError::ConfigError {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::from_yaml(&content).map_err(|e| MutationError::ConfigError {
            message: format!("Failed to parse config file '{}': {}", path.display(), e),
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Whether the named mutator should run
    pub fn is_enabled(&self, name: &str) -> bool {
        self.mutators.get(name).map_or(true, MutatorEntry::enabled)
    }

    /// User settings for the named mutator, empty when not configured
    pub fn settings_for(&self, name: &str) -> MutatorSettings {
        self.mutators
            .get(name)
            .map(MutatorEntry::settings)
            .unwrap_or_default()
    }

    /// Validate all mutator entries in the configuration
    pub fn validate(&self) -> Result<(), Vec<MutationError>> {
        let known = registry::known_names();

        let errors: Vec<_> = self
            .mutators
            .keys()
            .filter(|name| !known.contains(&name.as_str()))
            .map(|name| MutationError::UnknownMutator {
                name: name.clone(),
                known: known.iter().map(|k| k.to_string()).collect(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
