//! Review Records - Content Collection Loading

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::validation::Validator;
use crate::{ENGINE_VERSION, style::DEFAULT_CARD_COLOR};

/// A single testimonial's structured data, as authored in the collection's
/// JSON files. `name` and `review` are required; everything else is optional
/// and the renderer falls back to defaults when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub review: String,
    #[serde(default)]
    pub social_link: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ReviewRecord {
    /// Background color for this record's card, falling back to the neutral
    /// default when none was authored.
    pub fn card_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_CARD_COLOR)
    }
}

/// Image reference: either a bare URL string or a structured asset descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Asset {
        src: String,
        width: u32,
        height: u32,
        format: String,
    },
}

impl ImageRef {
    pub fn src(&self) -> &str {
        match self {
            ImageRef::Url(url) => url,
            ImageRef::Asset { src, .. } => src,
        }
    }
}

/// Per-collection settings, read from `collection.json` in the collection
/// directory. All fields have defaults so the file is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionConfig {
    #[serde(default = "default_min_version")]
    pub engine_min_version: String,
    #[serde(default)]
    pub failure_mode: FailureMode,
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_min_version() -> String {
    crate::MIN_COLLECTION_VERSION.to_string()
}

fn default_color() -> String {
    DEFAULT_CARD_COLOR.to_string()
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            engine_min_version: default_min_version(),
            failure_mode: FailureMode::default(),
            default_color: default_color(),
        }
    }
}

/// What to do with a record whose validation produced errors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    #[default]
    Block,
    Warn,
    Log,
}

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Collection requires engine >= {0}, current is {1}")]
    EngineVersionMismatch(String, String),

    #[error("Invalid collection config: {0}")]
    InvalidConfig(String),
}

/// A loaded review collection. Every record admitted here has passed through
/// validation under the collection's failure-mode policy.
#[derive(Debug)]
pub struct ReviewCollection {
    config: CollectionConfig,
    records: Vec<ReviewRecord>,
}

impl ReviewCollection {
    pub fn new() -> Self {
        Self {
            config: CollectionConfig::default(),
            records: Vec::new(),
        }
    }

    pub fn with_config(config: CollectionConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    /// Load all review records from a directory.
    ///
    /// Reads `collection.json` for settings if present, then every other
    /// `*.json` file as one record. Validation is always applied; under
    /// `FailureMode::Block` records with error-severity violations are
    /// dropped rather than aborting the whole load.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CollectionError> {
        let config = Self::load_config(dir)?;
        Self::check_engine_version(&config)?;

        let mut collection = Self::with_config(config);
        let validator = Validator::new();

        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().map_or(false, |e| e == "json")
                    && path.file_name().map_or(false, |n| n != "collection.json")
                {
                    let content = fs::read_to_string(&path)?;
                    let record: ReviewRecord =
                        serde_json::from_str(&content).map_err(|source| {
                            CollectionError::Parse {
                                path: path.display().to_string(),
                                source,
                            }
                        })?;
                    collection.admit(record, &validator);
                }
            }
        }

        Ok(collection)
    }

    fn load_config(dir: &Path) -> Result<CollectionConfig, CollectionError> {
        let path = dir.join("collection.json");
        if !path.exists() {
            return Ok(CollectionConfig::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| CollectionError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn check_engine_version(config: &CollectionConfig) -> Result<(), CollectionError> {
        let engine_ver = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| CollectionError::InvalidConfig("Invalid engine version".into()))?;
        let min_ver = semver::Version::parse(&config.engine_min_version).map_err(|_| {
            CollectionError::InvalidConfig("Invalid engineMinVersion in collection.json".into())
        })?;

        if engine_ver < min_ver {
            return Err(CollectionError::EngineVersionMismatch(
                config.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }

    fn admit(&mut self, record: ReviewRecord, validator: &Validator) {
        let result = validator.validate(&record, self.config.failure_mode);
        if result.valid {
            self.records.push(record);
        }
    }

    /// Register a record directly, bypassing file loading but not validation.
    pub fn register(&mut self, record: ReviewRecord) -> bool {
        let validator = Validator::new();
        let result = validator.validate(&record, self.config.failure_mode);
        let admitted = result.valid;
        if admitted {
            self.records.push(record);
        }
        admitted
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ReviewCollection {
    fn default() -> Self {
        Self::new()
    }
}
