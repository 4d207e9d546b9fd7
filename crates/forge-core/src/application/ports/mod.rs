//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `forge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FeatureCatalog`: Feature lookup and enumeration
//!   - `CompatibilityChecker`: Option validation
//!   - `TemplateRenderer`: Template rendering
//!   - `ByteSource`: Binary resource lookup
//!   - `Filesystem`: File operations
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ByteSource, CompatibilityChecker, FeatureCatalog, Filesystem, TemplateRenderer};

#[cfg(test)]
pub use output::{
    MockByteSource, MockCompatibilityChecker, MockFeatureCatalog, MockFilesystem,
    MockTemplateRenderer,
};
