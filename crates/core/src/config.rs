//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handling never reads environment variables, which keeps behaviour consistent across
//! multi-threaded runtimes and test harnesses.

use crate::constants::{DEFAULT_DOCTORS_COLLECTION, DEFAULT_PATIENTS_COLLECTION};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Connection settings for the MongoDB backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    connection_string: String,
    database: String,
    patients_collection: String,
    doctors_collection: String,
}

impl MongoConfig {
    /// Create a new `MongoConfig`. Every value must be non-blank.
    pub fn new(
        connection_string: String,
        database: String,
        patients_collection: String,
        doctors_collection: String,
    ) -> CoreResult<Self> {
        for (name, value) in [
            ("MONGODB_CONNECTION_STRING", &connection_string),
            ("DATABASE_NAME", &database),
            ("COLLECTION_NAME", &patients_collection),
            ("DOCTORS_COLLECTION", &doctors_collection),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidInput(format!("{name} cannot be empty")));
            }
        }

        Ok(Self {
            connection_string,
            database,
            patients_collection,
            doctors_collection,
        })
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn patients_collection(&self) -> &str {
        &self.patients_collection
    }

    pub fn doctors_collection(&self) -> &str {
        &self.doctors_collection
    }
}

/// Which record store backs the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    Mongo(MongoConfig),
    /// In-process documents, optionally seeded from a JSON fixture file.
    Memory { fixture: Option<PathBuf> },
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store: StoreConfig,
}

impl CoreConfig {
    /// Resolve configuration from the process environment.
    ///
    /// Call this once at startup, after loading any `.env` file.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Variables
    /// - `VITALS_STORE`: `mongo` (default) or `memory`
    /// - `MONGODB_CONNECTION_STRING`, `DATABASE_NAME`: required for `mongo`
    /// - `COLLECTION_NAME`: patients collection (default: `patients`)
    /// - `DOCTORS_COLLECTION`: doctors collection (default: `doctors`)
    /// - `VITALS_FIXTURE_PATH`: optional JSON seed file for `memory`
    ///
    /// # Errors
    /// Returns `CoreError::InvalidInput` if the backend is unknown or a required value is
    /// missing or blank.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend = value("VITALS_STORE").unwrap_or_else(|| "mongo".into());
        let store = match backend.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => {
                let require = |key: &str| {
                    value(key).ok_or_else(|| CoreError::InvalidInput(format!("{key} is not set")))
                };
                StoreConfig::Mongo(MongoConfig::new(
                    require("MONGODB_CONNECTION_STRING")?,
                    require("DATABASE_NAME")?,
                    value("COLLECTION_NAME").unwrap_or_else(|| DEFAULT_PATIENTS_COLLECTION.into()),
                    value("DOCTORS_COLLECTION").unwrap_or_else(|| DEFAULT_DOCTORS_COLLECTION.into()),
                )?)
            }
            "memory" => StoreConfig::Memory {
                fixture: value("VITALS_FIXTURE_PATH").map(PathBuf::from),
            },
            other => {
                return Err(CoreError::InvalidInput(format!(
                    "unknown VITALS_STORE backend: {other}"
                )))
            }
        };

        Ok(Self { store })
    }

    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Fixture path for the memory backend, if one was configured.
    pub fn fixture_path(&self) -> Option<&Path> {
        match &self.store {
            StoreConfig::Memory { fixture } => fixture.as_deref(),
            StoreConfig::Mongo(_) => None,
        }
    }
}
