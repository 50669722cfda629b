//! Registry of datasets, keyed by dataset id.
//!
//! This module provides a thread-safe registry that owns every dataset the
//! server knows about. Request handlers share a single registry.
//!
//! # Thread Safety
//!
//! The registry uses `RwLock` instead of `Mutex` so lookups run concurrently:
//! - Many requests can read the map at once
//! - Only dataset creation takes the write lock on the map
//! - Each dataset has its own `RwLock`, so writes to one dataset never block
//!   queries on another
//!
//! # Invariants
//!
//! - Each dataset id maps to exactly one `Dataset` instance
//! - Datasets are never removed once created (for the lifetime of the registry)
//! - All dataset ids are validated before insertion

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::constants::{MAX_DATASET_ID_LENGTH, SPARSE_MUTABLE_DATASET_TYPE};
use crate::dataset::Dataset;
use crate::types::DatasetConfig;

/// Errors produced by the registry.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A dataset with this id already exists.
    AlreadyExists(String),
    /// No dataset with this id exists.
    NotFound(String),
    /// The dataset type is not supported.
    UnknownDatasetType(String),
    /// The dataset id is malformed.
    InvalidDatasetId(DatasetIdValidationError),
    /// A lock was poisoned by a panicking thread.
    LockPoisoned,
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(id) => write!(f, "dataset '{id}' already exists"),
            Self::NotFound(id) => write!(f, "dataset '{id}' not found"),
            Self::UnknownDatasetType(t) => write!(
                f,
                "unknown dataset type '{t}'; supported types: {SPARSE_MUTABLE_DATASET_TYPE}"
            ),
            Self::InvalidDatasetId(e) => write!(f, "{e}"),
            Self::LockPoisoned => write!(f, "dataset lock poisoned"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Shared handle to one dataset.
pub type DatasetRef = Arc<RwLock<Dataset>>;

/// Registry of datasets, keyed by id.
#[derive(Default)]
pub struct DatasetRegistry {
    datasets: RwLock<HashMap<String, DatasetRef>>,
}

impl DatasetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The dataset type is not `sparse.mutable`
    /// - The id is invalid
    /// - A dataset with the same id already exists
    /// - The registry lock is poisoned
    #[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected
    #[allow(clippy::significant_drop_tightening)] // The lock must be held during insert
    pub fn create(&self, config: &DatasetConfig) -> Result<DatasetRef, RegistryError> {
        if config.dataset_type != SPARSE_MUTABLE_DATASET_TYPE {
            return Err(RegistryError::UnknownDatasetType(
                config.dataset_type.clone(),
            ));
        }
        validate_dataset_id(&config.id).map_err(RegistryError::InvalidDatasetId)?;

        let mut datasets = self
            .datasets
            .write()
            .map_err(|_| RegistryError::LockPoisoned)?;

        if datasets.contains_key(&config.id) {
            return Err(RegistryError::AlreadyExists(config.id.clone()));
        }

        let dataset = Arc::new(RwLock::new(Dataset::new(
            config.id.as_str(),
            config.dataset_type.as_str(),
        )));
        datasets.insert(config.id.clone(), Arc::clone(&dataset));

        tracing::info!("Created dataset '{}' of type '{}'", config.id, config.dataset_type);

        Ok(dataset)
    }

    /// Look up a dataset by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no dataset has this id, or `LockPoisoned`.
    #[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected
    pub fn get(&self, id: &str) -> Result<DatasetRef, RegistryError> {
        let datasets = self
            .datasets
            .read()
            .map_err(|_| RegistryError::LockPoisoned)?;
        datasets
            .get(id)
            .map(Arc::clone)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Number of datasets.
    pub fn dataset_count(&self) -> Result<usize, RegistryError> {
        Ok(self
            .datasets
            .read()
            .map_err(|_| RegistryError::LockPoisoned)?
            .len())
    }
}

/// Error returned when validating a dataset id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetIdValidationError {
    /// The id is empty.
    Empty,
    /// The id exceeds the maximum length.
    TooLong,
    /// The id contains invalid characters.
    InvalidCharacters,
}

impl std::fmt::Display for DatasetIdValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "dataset id must not be empty"),
            Self::TooLong => write!(
                f,
                "dataset id exceeds maximum length of {MAX_DATASET_ID_LENGTH} characters"
            ),
            Self::InvalidCharacters => write!(
                f,
                "dataset id contains invalid characters; only alphanumeric, hyphens, underscores and dots are allowed"
            ),
        }
    }
}

/// Validate that a dataset id is well-formed.
///
/// Valid ids:
/// - Are non-empty
/// - Are at most 256 characters
/// - Contain only alphanumeric characters, hyphens, underscores and dots
///
/// # Examples
///
/// ```
/// use server::dataset_registry::validate_dataset_id;
///
/// assert!(validate_dataset_id("x").is_ok());
/// assert!(validate_dataset_id("my_dataset.v2").is_ok());
/// assert!(validate_dataset_id("").is_err());
/// assert!(validate_dataset_id("../evil").is_err());
/// ```
pub fn validate_dataset_id(id: &str) -> Result<(), DatasetIdValidationError> {
    if id.is_empty() {
        return Err(DatasetIdValidationError::Empty);
    }

    if id.len() > MAX_DATASET_ID_LENGTH {
        return Err(DatasetIdValidationError::TooLong);
    }

    if id.starts_with('.')
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(DatasetIdValidationError::InvalidCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse(id: &str) -> DatasetConfig {
        DatasetConfig::new(SPARSE_MUTABLE_DATASET_TYPE, id)
    }

    #[test]
    fn test_validate_dataset_id_valid() {
        assert!(validate_dataset_id("x").is_ok());
        assert!(validate_dataset_id("my-dataset").is_ok());
        assert!(validate_dataset_id("my_dataset").is_ok());
        assert!(validate_dataset_id("data.v2").is_ok());
    }

    #[test]
    fn test_validate_dataset_id_empty() {
        assert_eq!(validate_dataset_id(""), Err(DatasetIdValidationError::Empty));
    }

    #[test]
    fn test_validate_dataset_id_too_long() {
        let long_id = "a".repeat(MAX_DATASET_ID_LENGTH + 1);
        assert_eq!(
            validate_dataset_id(&long_id),
            Err(DatasetIdValidationError::TooLong)
        );

        // Exactly at limit should be OK
        let at_limit = "a".repeat(MAX_DATASET_ID_LENGTH);
        assert!(validate_dataset_id(&at_limit).is_ok());
    }

    #[test]
    fn test_validate_dataset_id_invalid_characters() {
        for id in ["../evil", "my dataset", "a/b", "a\nb", ".hidden"] {
            assert_eq!(
                validate_dataset_id(id),
                Err(DatasetIdValidationError::InvalidCharacters),
                "{id:?}"
            );
        }
    }

    #[test]
    fn test_create_then_get_returns_same_instance() {
        let registry = DatasetRegistry::new();
        let created = registry.create(&sparse("x")).unwrap();
        let fetched = registry.get("x").unwrap();
        assert!(Arc::ptr_eq(&created, &fetched));
        assert_eq!(registry.dataset_count().unwrap(), 1);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let registry = DatasetRegistry::new();
        registry.create(&sparse("x")).unwrap();
        assert_eq!(
            registry.create(&sparse("x")).unwrap_err(),
            RegistryError::AlreadyExists("x".to_string())
        );
    }

    #[test]
    fn test_create_unknown_type_fails() {
        let registry = DatasetRegistry::new();
        let err = registry
            .create(&DatasetConfig::new("beh.mutable", "x"))
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownDatasetType("beh.mutable".to_string()));
        assert_eq!(registry.dataset_count().unwrap(), 0);
    }

    #[test]
    fn test_get_missing_fails() {
        let registry = DatasetRegistry::new();
        assert_eq!(
            registry.get("nope").unwrap_err(),
            RegistryError::NotFound("nope".to_string())
        );
    }
}
