//! Class reloading agents.

use forge_core::domain::{
    Artifact, DomainError, Feature, FeatureCategory, FeatureContext, FeaturePredicate,
    GeneratorContext, JdkVersion, RelativePath,
};

const SPRING_LOADED_JAR: &str = "springloaded-1.2.8.RELEASE.jar";

/// Newest runtime Spring Loaded can instrument.
const SPRING_LOADED_MAX_JDK: JdkVersion = JdkVersion::Jdk11;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpringLoaded;

impl SpringLoaded {
    pub const NAME: &'static str = "springloaded";

    /// Destination of the agent jar inside the generated project.
    pub fn agent_path() -> String {
        format!("agent/{SPRING_LOADED_JAR}")
    }
}

impl Feature for SpringLoaded {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        "Spring Loaded JVM Agent"
    }

    fn description(&self) -> &str {
        "Adds support for class reloading with Spring Loaded"
    }

    fn is_visible(&self) -> bool {
        false
    }

    fn documentation(&self) -> Option<&str> {
        Some("https://docs.micronaut.io/latest/guide/index.html#springloaded")
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::DevTools
    }

    fn process_selected_features(&self, context: &mut FeatureContext) {
        let jdk = context.options().jdk();
        if jdk > SPRING_LOADED_MAX_JDK {
            context.exclude(FeaturePredicate::excluding(Self::NAME).with_warning(format!(
                "springloaded was excluded because it does not support JDK {jdk}"
            )));
        }
    }

    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        context.add_artifact(
            "springLoadedJar",
            Artifact::binary(
                RelativePath::try_new(Self::agent_path())?,
                format!("springloaded/{SPRING_LOADED_JAR}"),
            ),
        )
    }
}

/// JRebel agent configuration. Takes precedence over Spring Loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct JRebel;

impl JRebel {
    pub const NAME: &'static str = "jrebel";
}

const REBEL_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<application generated-by="forge" xmlns="http://www.zeroturnaround.com">
    <id>{{PROJECT_NAME}}</id>
    <classpath>
        <dir name="build/classes/{{LANGUAGE}}/main"/>
        <dir name="build/resources/main"/>
    </classpath>
</application>
"#;

impl Feature for JRebel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        "JRebel JVM Agent"
    }

    fn description(&self) -> &str {
        "Adds support for class reloading with JRebel (requires separate JRebel installation)"
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::DevTools
    }

    fn process_selected_features(&self, context: &mut FeatureContext) {
        if context.is_selected(SpringLoaded::NAME) {
            context.exclude(
                FeaturePredicate::excluding(SpringLoaded::NAME)
                    .with_warning("springloaded was excluded because jrebel is selected"),
            );
        }
    }

    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        context.add_artifact(
            "rebelXml",
            Artifact::rendered(
                RelativePath::try_new("src/main/resources/rebel.xml")?,
                REBEL_XML,
            ),
        )
    }
}
