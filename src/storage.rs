// ABOUTME: Local persistence of the last generated plan and the last submitted profile
// ABOUTME: JSON records under fixed keys, replaced atomically via temp file and rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Store
//!
//! Records are opaque JSON documents named after fixed keys. There is no
//! versioning or migration: a stored plan is re-validated on load, and a
//! record that no longer validates is reported as an error rather than
//! silently dropped.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::constants::storage_keys;
use crate::errors::{AppError, AppResult};
use crate::models::{FitnessPlan, UserProfile};

/// File-backed store rooted at a data directory
#[derive(Debug, Clone)]
pub struct PlanStore {
    root: PathBuf,
}

impl PlanStore {
    /// Create a store rooted at `root`; the directory is created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the records
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Persist the latest plan, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record cannot be written.
    pub async fn save_plan(&self, plan: &FitnessPlan) -> AppResult<()> {
        self.write_record(storage_keys::FITNESS_PLAN, plan).await
    }

    /// Load the stored plan, if any
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record cannot be read, or a
    /// serialization error if it no longer parses as a plan.
    pub async fn load_plan(&self) -> AppResult<Option<FitnessPlan>> {
        self.read_record(storage_keys::FITNESS_PLAN).await
    }

    /// Remove the stored plan; returns whether one existed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record exists but cannot be removed.
    pub async fn clear_plan(&self) -> AppResult<bool> {
        match fs::remove_file(self.record_path(storage_keys::FITNESS_PLAN)).await {
            Ok(()) => {
                info!("Stored plan cleared");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::storage(format!("Failed to remove stored plan: {e}"))
                .with_source(e)),
        }
    }

    /// Persist the last submitted profile
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record cannot be written.
    pub async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        self.write_record(storage_keys::USER_DATA, profile).await
    }

    /// Load the stored profile, if any
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error if the record is unreadable.
    pub async fn load_profile(&self) -> AppResult<Option<UserProfile>> {
        self.read_record(storage_keys::USER_DATA).await
    }

    async fn write_record<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create data directory {}: {e}",
                self.root.display()
            ))
            .with_source(e)
        })?;

        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.record_path(key);
        let temp = self.root.join(format!(".{key}.json.tmp"));

        fs::write(&temp, &bytes).await.map_err(|e| {
            AppError::storage(format!("Failed to write record '{key}': {e}")).with_source(e)
        })?;
        fs::rename(&temp, &path).await.map_err(|e| {
            AppError::storage(format!("Failed to replace record '{key}': {e}")).with_source(e)
        })?;

        debug!(key, bytes = bytes.len(), "Record stored");
        Ok(())
    }

    async fn read_record<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let bytes = match fs::read(self.record_path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(
                    AppError::storage(format!("Failed to read record '{key}': {e}"))
                        .with_source(e),
                )
            }
        };
        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            AppError::serialization(format!("Stored record '{key}' is unreadable: {e}"))
                .with_source(e)
        })
    }
}
