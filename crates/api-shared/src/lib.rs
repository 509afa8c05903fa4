//! # API Shared
//!
//! Shared response definitions for the vitals analytics APIs.
//!
//! Contains:
//! - JSON response views (`views` module), each with an OpenAPI schema
//! - Shared services like `HealthService`
//!
//! Used by `vitals-core` (which builds the views) and by `api-rest` and the CLI (which serve or
//! print them).

pub mod health;
pub mod views;

pub use health::HealthService;
pub use views::*;
