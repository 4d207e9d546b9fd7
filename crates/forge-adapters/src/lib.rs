//! Infrastructure adapters for Forge.
//!
//! This crate implements the ports defined in `forge-core::application::ports`
//! and ships the built-in features. It contains all I/O.

pub mod catalog;
pub mod features;
pub mod filesystem;
pub mod manifest_loader;
pub mod renderer;
pub mod resources;

// Re-export commonly used adapters
pub use catalog::InMemoryCatalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest_loader::{ManifestFeature, ManifestFeatureLoader};
pub use renderer::SimpleRenderer;
pub use resources::{DirectoryByteSource, MemoryByteSource};
