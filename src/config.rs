use crate::domain::error::DomainError;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_NAME: &str = "VideosDB";
pub const DEFAULT_COLLECTION_NAME: &str = "VideoFeatures";
const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    InMemory,
    /// Directory holding `<database_name>.db`.
    Directory(PathBuf),
}

impl StoreLocation {
    pub fn parse(s: &str) -> Self {
        if s == IN_MEMORY {
            StoreLocation::InMemory
        } else {
            StoreLocation::Directory(PathBuf::from(s))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    pub database_name: String,
    pub collection_name: String,
    pub verbose: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: StoreLocation::Directory(PathBuf::from(".")),
            database_name: DEFAULT_DATABASE_NAME.into(),
            collection_name: DEFAULT_COLLECTION_NAME.into(),
            verbose: false,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            ..Self::default()
        }
    }

    pub fn in_directory(dir: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::Directory(dir.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Reads `VIDEOFEATURES_DIR`, `VIDEOFEATURES_DB`, `VIDEOFEATURES_COLLECTION`
    /// and `VIDEOFEATURES_VERBOSE`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            location: lookup("VIDEOFEATURES_DIR")
                .map(|s| StoreLocation::parse(&s))
                .unwrap_or(defaults.location),
            database_name: lookup("VIDEOFEATURES_DB").unwrap_or(defaults.database_name),
            collection_name: lookup("VIDEOFEATURES_COLLECTION")
                .unwrap_or(defaults.collection_name),
            verbose: lookup("VIDEOFEATURES_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Path handed to SQLite.
    pub fn connection_target(&self) -> String {
        match &self.location {
            StoreLocation::InMemory => IN_MEMORY.to_string(),
            StoreLocation::Directory(dir) => dir
                .join(format!("{}.db", self.database_name))
                .to_string_lossy()
                .into_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.database_name.is_empty()
            || self
                .database_name
                .contains(|c: char| c == '/' || c == '\\' || c == '\0')
        {
            return Err(DomainError::InvalidArgument(format!(
                "Invalid database name: {:?}",
                self.database_name
            )));
        }
        if !is_identifier(&self.collection_name) {
            return Err(DomainError::InvalidArgument(format!(
                "Collection name must match [A-Za-z_][A-Za-z0-9_]*, got {:?}",
                self.collection_name
            )));
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
