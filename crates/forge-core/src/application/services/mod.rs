//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve features" or "generate a project".

pub mod assembler;
pub mod compatibility;
pub mod generation;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::Assembler;
pub use compatibility::RegistryCompatibilityChecker;
pub use generation::{FeatureFilter, GenerationReport, GenerationRequest, GenerationService, Preview};
pub use resolver::{DEFAULT_MAX_PASSES, FeatureResolver, Resolution, ResolvedFeatures};
