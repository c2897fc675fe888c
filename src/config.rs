use crate::errors::PackError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_OUTPUT: &str = "pkg";

/// Overrides for `package.json`, either still JSON-encoded or already parsed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PackageJsonOverride {
    Text(String),
    Value(Value),
}

impl From<&str> for PackageJsonOverride {
    fn from(text: &str) -> Self {
        PackageJsonOverride::Text(text.to_owned())
    }
}

impl From<String> for PackageJsonOverride {
    fn from(text: String) -> Self {
        PackageJsonOverride::Text(text)
    }
}

impl From<Value> for PackageJsonOverride {
    fn from(value: Value) -> Self {
        PackageJsonOverride::Value(value)
    }
}

impl From<Map<String, Value>> for PackageJsonOverride {
    fn from(map: Map<String, Value>) -> Self {
        PackageJsonOverride::Value(Value::Object(map))
    }
}

/// Options as requested by the caller. Anything left out falls back to a default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackOptions {
    pub root: Option<PathBuf>,
    #[serde(alias = "files")]
    pub copy: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub output: Option<PathBuf>,
    #[serde(alias = "props")]
    pub packagejson: Option<PackageJsonOverride>,
}

impl PackOptions {
    /// Loads options from a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PackError> {
        let path = path.as_ref();
        debug!("Loading options from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            PackError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| PackError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Returns these options with every field set in `other` taking precedence.
    pub fn overlay(self, other: PackOptions) -> PackOptions {
        PackOptions {
            root: other.root.or(self.root),
            copy: other.copy.or(self.copy),
            include: other.include.or(self.include),
            exclude: other.exclude.or(self.exclude),
            output: other.output.or(self.output),
            packagejson: other.packagejson.or(self.packagejson),
        }
    }
}

/// Fully resolved configuration for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct PackConfig {
    pub root: PathBuf,
    pub copy: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub output: PathBuf,
    pub packagejson: Map<String, Value>,
}

impl Default for PackConfig {
    fn default() -> Self {
        PackConfig {
            root: PathBuf::from(DEFAULT_ROOT),
            copy: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            packagejson: Map::new(),
        }
    }
}

/// Applies `options` over the defaults. Present fields replace defaults wholesale.
pub fn resolve(options: PackOptions) -> Result<PackConfig, PackError> {
    let defaults = PackConfig::default();
    let packagejson = match options.packagejson {
        Some(overrides) => parse_overrides(overrides)?,
        None => defaults.packagejson,
    };

    let config = PackConfig {
        root: options.root.unwrap_or(defaults.root),
        copy: options.copy.unwrap_or(defaults.copy),
        include: options.include.unwrap_or(defaults.include),
        exclude: options.exclude.unwrap_or(defaults.exclude),
        output: options.output.unwrap_or(defaults.output),
        packagejson,
    };
    trace!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn parse_overrides(overrides: PackageJsonOverride) -> Result<Map<String, Value>, PackError> {
    let value = match overrides {
        PackageJsonOverride::Text(text) => serde_json::from_str(&text).map_err(|e| {
            PackError::ConfigError(format!("packagejson is not valid JSON: {}", e))
        })?,
        PackageJsonOverride::Value(value) => value,
    };
    Ok(spread_entries(value))
}

/// Keys a value contributes when spread into an object. Arrays and strings
/// contribute their indices, scalars contribute nothing.
pub fn spread_entries(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        Value::String(text) => text
            .chars()
            .enumerate()
            .map(|(i, c)| (i.to_string(), Value::String(c.to_string())))
            .collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) => Map::new(),
    }
}
