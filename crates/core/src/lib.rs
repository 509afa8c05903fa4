//! # Vitals Core
//!
//! Read-only analytics over patient vital-sign records.
//!
//! This crate holds the record model, value normalisation, risk scoring and the view builders:
//! - [`repositories`]: the [`RecordStore`] seam with MongoDB and in-memory backends
//! - [`analytics`]: population summaries, appointment counts and per-patient views
//! - [`config`]: store selection, resolved once at startup
//!
//! **No API concerns**: HTTP routing, status codes and the CLI belong in `api-rest` and
//! `vitals-cli`. Response shapes live in `api-shared`.

pub mod analytics;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod normalize;
pub mod repositories;
pub mod risk;

pub use analytics::AnalyticsService;
pub use config::{CoreConfig, MongoConfig, StoreConfig};
pub use error::{CoreError, CoreResult};
pub use repositories::RecordStore;
