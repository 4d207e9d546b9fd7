// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Forge.
//!
//! This module contains the feature contract and the per-run state that
//! features read and write, with no I/O. Rendering, resource lookup and
//! filesystem access are reached through ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable options**: `Options` is `Copy` and never changes during a run
//! - **Per-run contexts**: `FeatureContext` and `GeneratorContext` are owned by one run

pub mod capabilities;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    Artifact, ArtifactKind, ArtifactRegistry, Feature, FeatureCategory, FeatureContext,
    FeatureInfo, FeaturePredicate, FileContent, FileToWrite, GeneratorContext, Options,
    OptionsBuilder, ProjectName, ProjectStructure, RegisteredArtifact, RelativePath,
    RenderModel, TemplateSource,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{ApplicationType, BuildTool, GormImpl, JdkVersion, Language, TestFramework};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Option Set Tests
    // ========================================================================

    #[test]
    fn options_parse_from_cli_strings() {
        let options = Options::builder()
            .application_type(ApplicationType::from_str("rest-api").unwrap())
            .test_framework(TestFramework::from_str("junit").unwrap())
            .jdk(JdkVersion::from_str("21").unwrap())
            .language(Language::from_str("java").unwrap())
            .build();

        assert!(DomainValidator::validate_options(&options).is_ok());
        assert_eq!(options.jdk(), JdkVersion::Jdk21);
    }

    #[test]
    fn options_are_copy() {
        let a = Options::default();
        let b = a;
        assert_eq!(a, b);
    }

    // ========================================================================
    // Generation Context Tests
    // ========================================================================

    #[test]
    fn distinct_artifact_names_register_in_any_order() {
        let build = |order: [(&str, &str); 2]| {
            let mut ctx = GeneratorContext::new(
                Options::default(),
                ProjectName::new("demo").unwrap(),
                vec!["a".into(), "b".into()],
            );
            for (feature, artifact) in order {
                ctx.begin_contribution(feature);
                ctx.add_artifact(
                    artifact,
                    Artifact::rendered(RelativePath::new(artifact), "x"),
                )
                .unwrap();
            }
            ctx.finish().unwrap()
        };

        let forward = build([("a", "one"), ("b", "two")]);
        let reverse = build([("b", "two"), ("a", "one")]);

        assert_eq!(forward, reverse);
        assert_eq!(forward.names().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn project_name_validation_is_exposed() {
        assert!(DomainValidator::validate_project_name("ok-name").is_ok());
        assert!(matches!(
            DomainValidator::validate_project_name("bad/name"),
            Err(DomainError::InvalidProjectName { .. })
        ));
    }
}
