//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `forge-adapters` crate provides implementations.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{DomainError, Feature, Options, RenderModel};
use crate::error::ForgeResult;

/// Port for the feature catalog.
///
/// Implemented by:
/// - `forge_adapters::catalog::InMemoryCatalog` (built-in and manifest features)
///
/// The catalog is read-only once built and shared by every run.
#[cfg_attr(test, mockall::automock)]
pub trait FeatureCatalog: Send + Sync {
    /// Find a feature by its exact name.
    fn lookup(&self, name: &str) -> Option<Arc<dyn Feature>>;

    /// Every registered feature, in registration order.
    fn features(&self) -> Vec<Arc<dyn Feature>>;
}

/// Port for option compatibility checks.
///
/// Runs before any feature hook; hooks assume a checked option set.
#[cfg_attr(test, mockall::automock)]
pub trait CompatibilityChecker: Send + Sync {
    fn check(&self, options: &Options) -> Result<(), DomainError>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `forge_adapters::renderer::SimpleRenderer` (placeholder substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` for the artifact called `artifact`.
    fn render(&self, artifact: &str, template: &str, model: &RenderModel) -> ForgeResult<String>;
}

/// Port for binary resource lookup.
///
/// Implemented by:
/// - `forge_adapters::resources::DirectoryByteSource` (production)
/// - `forge_adapters::resources::MemoryByteSource` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ByteSource: Send + Sync {
    /// Read the bytes behind an opaque resource reference.
    fn read(&self, reference: &str) -> ForgeResult<Vec<u8>>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `forge_adapters::filesystem::LocalFilesystem` (production)
/// - `forge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &[u8]) -> ForgeResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;
}
