//! Application layer for Forge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (FeatureResolver, Assembler, GenerationService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Feature rules live
//! in the features themselves; the services only decide when they run.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    Assembler, DEFAULT_MAX_PASSES, FeatureFilter, FeatureResolver, GenerationReport,
    GenerationRequest, GenerationService, Preview, RegistryCompatibilityChecker, Resolution,
    ResolvedFeatures,
};

pub use ports::{ByteSource, CompatibilityChecker, FeatureCatalog, Filesystem, TemplateRenderer};

pub use error::ApplicationError;
