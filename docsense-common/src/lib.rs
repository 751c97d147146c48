//! docsense common - shared types, utilities, and configuration for docsense services.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Configuration validation
//! - Error types and handling utilities
//! - Logging setup and request tracing helpers
//! - Small utility functions used across services

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod config_loader;
pub mod error;
pub mod logging;
pub mod util;
pub mod validation;

pub use config::{
    AnalysisConfig, Config, ModelsConfig, NetworkConfig, ObservabilityConfig,
    PreprocessingConfig, ServiceConfig,
};
pub use error::{Error, Result};
pub use validation::{Validate, ValidationError, ValidationResult};
