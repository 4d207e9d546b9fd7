//! Application skeleton: build scripts, configuration and the entry point.

use forge_core::domain::{
    Artifact, BuildTool, DomainError, Feature, FeatureCategory, GeneratorContext, GormImpl,
    Language, RelativePath,
};

use super::{dependency_line, reloading::SpringLoaded};

const BUILD_GRADLE: &str = r#"plugins {
    id "{{LANGUAGE}}"
    id "application"
}

group = "{{PACKAGE_NAME}}"
version = "0.1"

java {
    toolchain {
        languageVersion = JavaLanguageVersion.of({{JDK_VERSION}})
    }
}

repositories {
    mavenCentral()
}

dependencies {
{{DEPENDENCIES}}
}

application {
    mainClass = "{{PACKAGE_NAME}}.Application"
}
{{RUN_CONFIG}}"#;

const BUILD_GRADLE_KTS: &str = r#"plugins {
    id("{{LANGUAGE}}")
    application
}

group = "{{PACKAGE_NAME}}"
version = "0.1"

java {
    toolchain {
        languageVersion.set(JavaLanguageVersion.of({{JDK_VERSION}}))
    }
}

repositories {
    mavenCentral()
}

dependencies {
{{DEPENDENCIES}}
}

application {
    mainClass.set("{{PACKAGE_NAME}}.Application")
}
{{RUN_CONFIG}}"#;

const SETTINGS_GRADLE: &str = "rootProject.name = \"{{PROJECT_NAME}}\"\n";

const APPLICATION_YML: &str = r#"info:
    app:
        name: "{{PROJECT_NAME}}"
        version: "0.1"
grails:
    profile: "{{APPLICATION_TYPE}}"
    gorm:
        implementation: "{{GORM}}"
"#;

const APPLICATION_GROOVY: &str = r#"package {{PACKAGE_NAME}}

import grails.boot.GrailsApp
import grails.boot.config.GrailsAutoConfiguration

class Application extends GrailsAutoConfiguration {
    static void main(String[] args) {
        GrailsApp.run(Application, args)
    }
}
"#;

const APPLICATION_JAVA: &str = r#"package {{PACKAGE_NAME}};

import grails.boot.GrailsApp;
import grails.boot.config.GrailsAutoConfiguration;

public class Application extends GrailsAutoConfiguration {
    public static void main(String[] args) {
        GrailsApp.run(Application.class, args);
    }
}
"#;

const APPLICATION_KOTLIN: &str = r#"package {{PACKAGE_NAME}}

import grails.boot.GrailsApp
import grails.boot.config.GrailsAutoConfiguration

class Application : GrailsAutoConfiguration()

fun main(args: Array<String>) {
    GrailsApp.run(Application::class.java, *args)
}
"#;

const GITIGNORE: &str = ".gradle/\nbuild/\nout/\n.idea/\n*.iml\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct Web;

impl Web {
    pub const NAME: &'static str = "web";
}

impl Feature for Web {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        "Web Application"
    }

    fn description(&self) -> &str {
        "Application skeleton with build scripts, configuration and entry point"
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::Server
    }

    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        let options = *context.options();
        let build_tool = options.build_tool();

        let (build_template, settings_file) = match build_tool {
            BuildTool::Gradle => (BUILD_GRADLE, "settings.gradle"),
            BuildTool::GradleKotlin => (BUILD_GRADLE_KTS, "settings.gradle.kts"),
        };

        let build_path = RelativePath::try_new(build_tool.build_file())?;
        let build = Artifact::rendered(build_path, build_template)
            .with_variable("DEPENDENCIES", dependencies(context, options.gorm(), build_tool))
            .with_variable("RUN_CONFIG", run_config(context, build_tool));
        context.add_artifact("buildGradle", build)?;

        context.add_artifact(
            "settingsGradle",
            Artifact::rendered(RelativePath::try_new(settings_file)?, SETTINGS_GRADLE),
        )?;

        context.add_artifact(
            "applicationYml",
            Artifact::rendered(
                RelativePath::try_new("grails-app/conf/application.yml")?,
                APPLICATION_YML,
            ),
        )?;

        let language = options.language();
        let entry_point = match language {
            Language::Groovy => APPLICATION_GROOVY,
            Language::Java => APPLICATION_JAVA,
            Language::Kotlin => APPLICATION_KOTLIN,
        };
        let entry_path = RelativePath::try_new("grails-app/init")?
            .join(context.project().package_name())?
            .join(format!("Application.{}", language.file_extension()))?;
        context.add_artifact("application", Artifact::rendered(entry_path, entry_point))?;

        context.add_artifact(
            "gitignore",
            Artifact::rendered(RelativePath::try_new(".gitignore")?, GITIGNORE),
        )
    }
}

fn dependencies(context: &GeneratorContext, gorm: Option<GormImpl>, build_tool: BuildTool) -> String {
    let mut lines = Vec::new();

    if let Some(gorm) = gorm {
        lines.push(format!(
            "implementation \"org.grails.plugins:gorm-{gorm}\"",
        ));
    }
    lines.extend(
        context
            .features()
            .iter()
            .filter_map(|name| dependency_line(name))
            .map(str::to_string),
    );

    lines
        .into_iter()
        .map(|line| match build_tool {
            BuildTool::Gradle => format!("    {line}"),
            BuildTool::GradleKotlin => format!("    {}", to_kotlin_call(&line)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `implementation "x"` becomes `implementation("x")`.
fn to_kotlin_call(line: &str) -> String {
    match line.split_once(' ') {
        Some((configuration, coordinate)) => format!("{configuration}({coordinate})"),
        None => line.to_string(),
    }
}

fn run_config(context: &GeneratorContext, build_tool: BuildTool) -> String {
    if !context.is_feature_present(SpringLoaded::NAME) {
        return String::new();
    }

    let agent = SpringLoaded::agent_path();
    match build_tool {
        BuildTool::Gradle => format!(
            "\ntasks.named(\"run\") {{\n    jvmArgs \"-javaagent:{agent}\", \"-noverify\"\n}}\n"
        ),
        BuildTool::GradleKotlin => format!(
            "\ntasks.named<JavaExec>(\"run\") {{\n    jvmArgs(\"-javaagent:{agent}\", \"-noverify\")\n}}\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::domain::{ApplicationType, ArtifactRegistry, JdkVersion, Options, ProjectName};

    fn apply(options: Options, features: &[&str]) -> ArtifactRegistry {
        let mut ctx = GeneratorContext::new(
            options,
            ProjectName::new("demo-app").unwrap(),
            features.iter().map(|f| f.to_string()).collect(),
        );
        ctx.begin_contribution(Web::NAME);
        Web.apply(&mut ctx).unwrap();
        ctx.finish().unwrap()
    }

    fn variable(registry: &ArtifactRegistry, artifact: &str, key: &str) -> String {
        match registry.get(artifact).unwrap() {
            Artifact::Rendered { variables, .. } => variables[key].clone(),
            Artifact::Binary { .. } => panic!("{artifact} is binary"),
        }
    }

    #[test]
    fn contributes_skeleton_artifacts() {
        let registry = apply(Options::default(), &["web"]);

        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["application", "applicationYml", "buildGradle", "gitignore", "settingsGradle"]
        );
        assert_eq!(
            registry.get("application").unwrap().path().as_str(),
            "grails-app/init/demoapp/Application.groovy"
        );
    }

    #[test]
    fn kotlin_dsl_changes_build_file_names() {
        let options = Options::builder()
            .application_type(ApplicationType::RestApi)
            .build_tool(BuildTool::GradleKotlin)
            .language(Language::Kotlin)
            .test_framework(forge_core::domain::TestFramework::Junit)
            .build();
        let registry = apply(options, &["web"]);

        assert_eq!(registry.get("buildGradle").unwrap().path().as_str(), "build.gradle.kts");
        assert_eq!(
            registry.get("settingsGradle").unwrap().path().as_str(),
            "settings.gradle.kts"
        );
        assert!(registry.get("application").unwrap().path().as_str().ends_with(".kt"));
    }

    #[test]
    fn agent_args_follow_springloaded_presence() {
        let options = Options::builder()
            .application_type(ApplicationType::Web)
            .jdk(JdkVersion::Jdk11)
            .build();

        let with_agent = apply(options, &["web", "springloaded"]);
        assert!(variable(&with_agent, "buildGradle", "RUN_CONFIG")
            .contains("-javaagent:agent/springloaded-1.2.8.RELEASE.jar"));

        let without_agent = apply(options, &["web"]);
        assert_eq!(variable(&without_agent, "buildGradle", "RUN_CONFIG"), "");
    }

    #[test]
    fn dependencies_list_gorm_and_selected_features() {
        let registry = apply(Options::default(), &["web", "h2", "rabbitmq", "jackson"]);
        let deps = variable(&registry, "buildGradle", "DEPENDENCIES");

        assert!(deps.contains("gorm-hibernate"));
        assert!(deps.contains("com.h2database:h2"));
        assert!(deps.contains("amqp-client"));
        assert!(deps.contains("jackson-databind"));
    }

    #[test]
    fn kotlin_dependency_lines_use_call_syntax() {
        assert_eq!(
            to_kotlin_call("runtimeOnly \"com.h2database:h2\""),
            "runtimeOnly(\"com.h2database:h2\")"
        );
    }
}
