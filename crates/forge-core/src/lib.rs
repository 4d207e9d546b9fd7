//! Forge Core - feature resolution and artifact assembly.
//!
//! This crate provides the domain and application layers for the Forge
//! application generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            forge-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (FeatureResolver, Assembler,           │
//! │   GenerationService)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Catalog, Checker, Renderer,           │
//! │   ByteSource, Filesystem)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    forge-adapters (Infrastructure)      │
//! │  (InMemoryCatalog, SimpleRenderer, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Options, Feature, FeatureContext,     │
//! │   GeneratorContext, ArtifactRegistry)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forge_core::prelude::*;
//!
//! let options = Options::builder()
//!     .application_type(ApplicationType::Web)
//!     .jdk(JdkVersion::Jdk11)
//!     .build();
//!
//! let service = GenerationService::new(catalog, renderer, bytes, filesystem);
//! let request = GenerationRequest::new("demo", options).with_features(["web", "springloaded"]);
//! let preview = service.preview(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Assembler, FeatureFilter, FeatureResolver, GenerationReport, GenerationRequest,
        GenerationService, Preview, RegistryCompatibilityChecker, Resolution, ResolvedFeatures,
        ports::{ByteSource, CompatibilityChecker, FeatureCatalog, Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        ApplicationType, Artifact, ArtifactRegistry, BuildTool, DomainError, Feature,
        FeatureCategory, FeatureContext, FeatureInfo, FeaturePredicate, GeneratorContext,
        GormImpl, JdkVersion, Language, Options, ProjectName, RelativePath, RenderModel,
        TestFramework,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
