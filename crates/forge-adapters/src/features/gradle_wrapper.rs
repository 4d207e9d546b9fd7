use forge_core::domain::{
    Artifact, DomainError, Feature, FeatureCategory, GeneratorContext, RelativePath,
};

const GRADLE_VERSION: &str = "8.7";

const WRAPPER_PROPERTIES: &str = r#"distributionBase=GRADLE_USER_HOME
distributionPath=wrapper/dists
distributionUrl=https\://services.gradle.org/distributions/gradle-{{GRADLE_VERSION}}-bin.zip
zipStoreBase=GRADLE_USER_HOME
zipStorePath=wrapper/dists
"#;

const GRADLEW: &str = r#"#!/bin/sh
# Gradle start up script for {{PROJECT_NAME}}
APP_HOME=$(cd "$(dirname "$0")" && pwd -P)
CLASSPATH=$APP_HOME/gradle/wrapper/gradle-wrapper.jar
exec java $JAVA_OPTS -classpath "$CLASSPATH" org.gradle.wrapper.GradleWrapperMain "$@"
"#;

const GRADLEW_BAT: &str = "@rem Gradle start up script for {{PROJECT_NAME}}\r\n\
@set APP_HOME=%~dp0\r\n\
@set CLASSPATH=%APP_HOME%\\gradle\\wrapper\\gradle-wrapper.jar\r\n\
@java %JAVA_OPTS% -classpath \"%CLASSPATH%\" org.gradle.wrapper.GradleWrapperMain %*\r\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct GradleWrapper;

impl GradleWrapper {
    pub const NAME: &'static str = "gradle-wrapper";
}

impl Feature for GradleWrapper {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        "Gradle Wrapper"
    }

    fn description(&self) -> &str {
        "Adds the Gradle wrapper so the project builds without a local Gradle install"
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::Build
    }

    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        context.add_artifact(
            "gradleWrapperJar",
            Artifact::binary(
                RelativePath::try_new("gradle/wrapper/gradle-wrapper.jar")?,
                "gradle/gradle-wrapper.jar",
            ),
        )?;
        context.add_artifact(
            "gradleWrapperProperties",
            Artifact::rendered(
                RelativePath::try_new("gradle/wrapper/gradle-wrapper.properties")?,
                WRAPPER_PROPERTIES,
            )
            .with_variable("GRADLE_VERSION", GRADLE_VERSION),
        )?;
        context.add_artifact(
            "gradlew",
            Artifact::rendered(RelativePath::try_new("gradlew")?, GRADLEW).executable(),
        )?;
        context.add_artifact(
            "gradlewBat",
            Artifact::rendered(RelativePath::try_new("gradlew.bat")?, GRADLEW_BAT),
        )
    }
}
