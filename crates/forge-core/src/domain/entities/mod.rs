pub mod artifact;
pub mod common;
pub mod feature;
pub mod feature_context;
pub mod generator_context;
pub mod options;
pub mod predicate;
pub mod project_structure;
pub mod render_model;

pub use crate::domain::DomainError;
pub use artifact::{Artifact, ArtifactKind, ArtifactRegistry, RegisteredArtifact, TemplateSource};
pub use common::{ProjectName, RelativePath};
pub use feature::{Feature, FeatureCategory, FeatureInfo};
pub use feature_context::FeatureContext;
pub use generator_context::GeneratorContext;
pub use options::{Options, OptionsBuilder};
pub use predicate::FeaturePredicate;
pub use project_structure::{FileContent, FileToWrite, ProjectStructure};
pub use render_model::RenderModel;
