//! Top-level error of a simulator invocation.

use crate::config::ConfigError;
use crate::exporter::ExportError;
use admission_core::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid applicant population: {0}")]
    Registry(#[from] RegistryError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("unknown scenario: {0}")]
    Scenario(String),
}
