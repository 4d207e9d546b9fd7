use tracing::{debug, error, info, instrument};

use crate::{
    application::services::resolver::ResolvedFeatures,
    domain::{ArtifactRegistry, DomainError, GeneratorContext, Options, ProjectName},
};

/// Runs every resolved feature's contribution hook against a fresh
/// generation context and returns the finished artifact registry.
///
/// Beyond name uniqueness (enforced by the context) no validation happens
/// here; destination paths are the serializer's concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler;

impl Assembler {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip_all, fields(project = %project, features = resolved.len()))]
    pub fn assemble(
        &self,
        resolved: ResolvedFeatures,
        options: Options,
        project: ProjectName,
    ) -> Result<ArtifactRegistry, DomainError> {
        let features = resolved.into_inner();
        let names = features.iter().map(|f| f.name().to_string()).collect();
        let mut context = GeneratorContext::new(options, project, names);

        for feature in &features {
            context.begin_contribution(feature.name());
            if let Err(e) = feature.apply(&mut context) {
                error!(feature = feature.name(), error = %e, "feature contribution failed");
                return Err(e);
            }
            debug!(feature = feature.name(), "feature contributed");
        }

        let registry = context.finish()?;
        info!(artifacts = registry.len(), "artifacts assembled");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::services::{
        compatibility::RegistryCompatibilityChecker,
        resolver::FeatureResolver,
        test_support::{StubCatalog, StubFeature},
    };
    use crate::domain::{Artifact, RelativePath};

    fn resolve(catalog: StubCatalog, names: &[&str]) -> ResolvedFeatures {
        FeatureResolver::new(Arc::new(catalog), Arc::new(RegistryCompatibilityChecker))
            .resolve(names, Options::default())
            .unwrap()
            .features
    }

    fn assemble(resolved: ResolvedFeatures) -> Result<ArtifactRegistry, DomainError> {
        Assembler::new().assemble(
            resolved,
            Options::default(),
            ProjectName::new("demo").unwrap(),
        )
    }

    #[test]
    fn same_artifact_name_from_two_features_collides() {
        let catalog = StubCatalog::default()
            .with(StubFeature::new("web").contributes("applicationYml", "grails-app/conf/application.yml"))
            .with(StubFeature::new("rest").contributes("applicationYml", "conf/application.yml"));

        let err = assemble(resolve(catalog, &["web", "rest"])).unwrap_err();

        assert_eq!(
            err,
            DomainError::ArtifactNameCollision {
                name: "applicationYml".into(),
                first_feature: "web".into(),
                second_feature: "rest".into(),
            }
        );
    }

    #[test]
    fn distinct_artifacts_succeed_in_either_order() {
        let catalog = || {
            StubCatalog::default()
                .with(StubFeature::new("web").contributes("buildGradle", "build.gradle"))
                .with(StubFeature::new("h2").contributes("dataSource", "conf/datasource.yml"))
        };

        let forward = assemble(resolve(catalog(), &["web", "h2"])).unwrap();
        let reverse = assemble(resolve(catalog(), &["h2", "web"])).unwrap();

        assert_eq!(forward, reverse);
        assert_eq!(forward.contributed_by("dataSource"), Some("h2"));
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn features_may_check_presence_during_contribution() {
        let catalog = StubCatalog::default()
            .with(StubFeature::new("jrebel"))
            .with(StubFeature::new("web").on_apply(|ctx| {
                let agent = if ctx.is_feature_present("jrebel") { "jrebel" } else { "none" };
                ctx.add_artifact(
                    "buildGradle",
                    Artifact::rendered(RelativePath::new("build.gradle"), "agent={{AGENT}}")
                        .with_variable("AGENT", agent),
                )
            }));

        let registry = assemble(resolve(catalog, &["web", "jrebel"])).unwrap();

        match registry.get("buildGradle").unwrap() {
            Artifact::Rendered { variables, .. } => assert_eq!(variables["AGENT"], "jrebel"),
            Artifact::Binary { .. } => panic!("expected rendered artifact"),
        }
    }

    #[test]
    fn nothing_resolved_yields_empty_registry() {
        let registry = assemble(resolve(StubCatalog::default(), &[])).unwrap();
        assert!(registry.is_empty());
    }
}
