use crate::errors::PackError;
use serde_json::error::Category;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub const MANIFEST_FILE: &str = "package.json";

/// Key that spreading an array or string override leaves behind.
pub const SPREAD_ARTIFACT_KEY: &str = "0";

/// Contents of a `package.json`, keys kept in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn new(fields: Map<String, Value>) -> Self {
        Manifest { fields }
    }

    /// Reads `{root}/package.json`. A missing or malformed manifest is fatal.
    pub fn load(root: &Path) -> Result<Self, PackError> {
        let path = root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(PackError::MissingManifest(path));
        }

        debug!("Reading manifest {}", path.display());
        let content = fs::read_to_string(&path)
            .map_err(|e| PackError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: PathBuf) -> Result<Self, PackError> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            PackError::ManifestParseError {
                path: path.clone(),
                name: error_name(e.classify()).to_owned(),
                message: e.to_string(),
            }
        })?;

        match value {
            Value::Object(fields) => Ok(Manifest { fields }),
            other => Err(PackError::ManifestParseError {
                path,
                name: "TypeError".to_owned(),
                message: format!("expected a JSON object, found {}", json_type(&other)),
            }),
        }
    }

    /// Overlays `overrides` on these fields, see [`merge_fields`].
    pub fn merge(&self, overrides: &Map<String, Value>) -> Manifest {
        Manifest {
            fields: merge_fields(&self.fields, overrides),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, PackError> {
        serde_json::to_string_pretty(&self.fields)
            .map_err(|e| PackError::IoError(format!("Failed to serialize manifest: {}", e)))
    }

    /// Writes the manifest to `{output}/package.json`, replacing any existing file.
    pub fn write(&self, output: &Path) -> Result<PathBuf, PackError> {
        let path = output.join(MANIFEST_FILE);
        let json = self.to_pretty_json()?;
        fs::write(&path, json)
            .map_err(|e| PackError::IoError(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!("Wrote manifest {}", path.display());
        Ok(path)
    }
}

/// Shallow merge: every override key replaces the base value, keys only in
/// `base` are kept, and the `"0"` spread artifact never survives.
pub fn merge_fields(
    base: &Map<String, Value>,
    overrides: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        trace!("Overriding manifest field \"{}\"", key);
        merged.insert(key.clone(), value.clone());
    }
    if merged.shift_remove(SPREAD_ARTIFACT_KEY).is_some() {
        debug!("Dropped stray \"{}\" key from merged manifest", SPREAD_ARTIFACT_KEY);
    }
    merged
}

fn error_name(category: Category) -> &'static str {
    match category {
        Category::Syntax => "SyntaxError",
        Category::Eof => "UnexpectedEndOfInput",
        Category::Data => "DataError",
        Category::Io => "IoError",
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
