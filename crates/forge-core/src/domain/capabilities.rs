//! Option capability registry.
//!
//! Each application type is described exactly once by its
//! [`ApplicationTypeDef`]; each test framework by its [`TestFrameworkDef`].
//! All inference and compatibility checks are table lookups.
//!
//! # Adding a New Application Type
//!
//! 1. Add a variant to `ApplicationType` in `value_objects.rs`
//! 2. Add one [`ApplicationTypeDef`] entry to [`APPLICATION_TYPE_REGISTRY`]

use crate::domain::value_objects::{
    ApplicationType, BuildTool, GormImpl, JdkVersion, Language, TestFramework,
};

// ── Application type definitions ─────────────────────────────────────────────

/// Describes which options an application type accepts and its defaults.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationTypeDef {
    pub application_type: ApplicationType,

    /// One-line description shown by `forge list`.
    pub description: &'static str,

    /// Test frameworks the generated build can wire up.
    pub supported_test_frameworks: &'static [TestFramework],

    /// Source languages the skeleton ships templates for.
    pub supported_languages: &'static [Language],

    /// Whether a GORM implementation may be selected at all.
    pub allows_gorm: bool,

    pub default_test_framework: TestFramework,

    /// GORM implementation used when the caller does not pick one.
    /// Must be `None` when `allows_gorm` is false.
    pub default_gorm: Option<GormImpl>,
}

/// Single source of truth for application type capabilities.
pub static APPLICATION_TYPE_REGISTRY: &[ApplicationTypeDef] = &[
    ApplicationTypeDef {
        application_type: ApplicationType::Web,
        description: "Web application with views",
        supported_test_frameworks: &[TestFramework::Spock, TestFramework::Junit],
        supported_languages: &[Language::Groovy, Language::Java, Language::Kotlin],
        allows_gorm: true,
        default_test_framework: TestFramework::Spock,
        default_gorm: Some(GormImpl::Hibernate),
    },
    ApplicationTypeDef {
        application_type: ApplicationType::RestApi,
        description: "REST API without views",
        supported_test_frameworks: &[TestFramework::Spock, TestFramework::Junit],
        supported_languages: &[Language::Groovy, Language::Java, Language::Kotlin],
        allows_gorm: true,
        default_test_framework: TestFramework::Spock,
        default_gorm: Some(GormImpl::Hibernate),
    },
    ApplicationTypeDef {
        application_type: ApplicationType::WebPlugin,
        description: "Plugin contributing controllers and views",
        supported_test_frameworks: &[TestFramework::Spock],
        supported_languages: &[Language::Groovy],
        allows_gorm: true,
        default_test_framework: TestFramework::Spock,
        default_gorm: None,
    },
    ApplicationTypeDef {
        application_type: ApplicationType::Plugin,
        description: "Plain plugin",
        supported_test_frameworks: &[TestFramework::Spock],
        supported_languages: &[Language::Groovy],
        allows_gorm: false,
        default_test_framework: TestFramework::Spock,
        default_gorm: None,
    },
];

// ── Test framework definitions ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct TestFrameworkDef {
    pub test_framework: TestFramework,
    pub supported_languages: &'static [Language],
}

pub static TEST_FRAMEWORK_REGISTRY: &[TestFrameworkDef] = &[
    TestFrameworkDef {
        test_framework: TestFramework::Spock,
        // Specifications are Groovy classes; Java sources can sit next to them.
        supported_languages: &[Language::Groovy, Language::Java],
    },
    TestFrameworkDef {
        test_framework: TestFramework::Junit,
        supported_languages: &[Language::Groovy, Language::Java, Language::Kotlin],
    },
];

/// Oldest runtime the Kotlin Gradle DSL template supports.
pub const MIN_JDK_FOR_KOTLIN_DSL: JdkVersion = JdkVersion::Jdk11;

// ── Registry lookup API ──────────────────────────────────────────────────────

pub fn find_application_type(
    application_type: ApplicationType,
) -> Option<&'static ApplicationTypeDef> {
    APPLICATION_TYPE_REGISTRY
        .iter()
        .find(|def| def.application_type == application_type)
}

pub fn find_test_framework(test_framework: TestFramework) -> Option<&'static TestFrameworkDef> {
    TEST_FRAMEWORK_REGISTRY
        .iter()
        .find(|def| def.test_framework == test_framework)
}

/// Default test framework for an application type.
pub fn infer_test_framework(application_type: ApplicationType) -> TestFramework {
    find_application_type(application_type)
        .map(|def| def.default_test_framework)
        .unwrap_or(TestFramework::Spock)
}

/// Default GORM implementation for an application type.
pub fn infer_gorm(application_type: ApplicationType) -> Option<GormImpl> {
    find_application_type(application_type).and_then(|def| def.default_gorm)
}

/// Validate a full option combination.
///
/// Returns `Ok(())` on success or a human-readable reason.
pub fn validate_options(
    application_type: ApplicationType,
    build_tool: BuildTool,
    test_framework: TestFramework,
    gorm: Option<GormImpl>,
    jdk: JdkVersion,
    language: Language,
) -> Result<(), String> {
    let def = find_application_type(application_type)
        .ok_or_else(|| format!("application type '{application_type}' is not registered"))?;

    if !def.supported_test_frameworks.contains(&test_framework) {
        return Err(format!(
            "{application_type} supports test frameworks [{}] but '{test_framework}' was requested",
            join(def.supported_test_frameworks.iter().map(|t| t.as_str()))
        ));
    }

    if !def.supported_languages.contains(&language) {
        return Err(format!(
            "{application_type} supports languages [{}] but '{language}' was requested",
            join(def.supported_languages.iter().map(|l| l.as_str()))
        ));
    }

    if let Some(gorm) = gorm {
        if !def.allows_gorm {
            return Err(format!(
                "{application_type} does not use GORM but '{gorm}' was requested"
            ));
        }
    }

    let supported = find_test_framework(test_framework)
        .map(|d| d.supported_languages)
        .unwrap_or(&[]);
    if !supported.contains(&language) {
        return Err(format!(
            "test framework '{test_framework}' supports [{}] but language '{language}' was requested",
            join(supported.iter().map(|l| l.as_str()))
        ));
    }

    if build_tool == BuildTool::GradleKotlin && jdk < MIN_JDK_FOR_KOTLIN_DSL {
        return Err(format!(
            "build tool '{build_tool}' requires JDK {MIN_JDK_FOR_KOTLIN_DSL} or newer but JDK {jdk} was requested"
        ));
    }

    Ok(())
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are internally consistent.
///
/// Panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for application_type in ApplicationType::ALL {
        assert!(
            find_application_type(application_type).is_some(),
            "application type {application_type:?} is not registered"
        );
    }

    for def in APPLICATION_TYPE_REGISTRY {
        assert!(
            def.supported_test_frameworks
                .contains(&def.default_test_framework),
            "{:?}: default test framework {:?} is not supported",
            def.application_type,
            def.default_test_framework
        );
        assert!(
            def.allows_gorm || def.default_gorm.is_none(),
            "{:?}: default GORM set although GORM is not allowed",
            def.application_type
        );
        for tf in def.supported_test_frameworks {
            assert!(
                find_test_framework(*tf).is_some(),
                "{:?} references unregistered test framework {tf:?}",
                def.application_type
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn web_defaults_to_spock_and_hibernate() {
        assert_eq!(infer_test_framework(ApplicationType::Web), TestFramework::Spock);
        assert_eq!(infer_gorm(ApplicationType::Web), Some(GormImpl::Hibernate));
    }

    #[test]
    fn plugin_has_no_default_gorm() {
        assert_eq!(infer_gorm(ApplicationType::Plugin), None);
    }

    #[test]
    fn web_groovy_spock_is_valid() {
        assert!(
            validate_options(
                ApplicationType::Web,
                BuildTool::Gradle,
                TestFramework::Spock,
                Some(GormImpl::Hibernate),
                JdkVersion::Jdk17,
                Language::Groovy,
            )
            .is_ok()
        );
    }

    #[test]
    fn plugin_with_junit_is_rejected() {
        let err = validate_options(
            ApplicationType::Plugin,
            BuildTool::Gradle,
            TestFramework::Junit,
            None,
            JdkVersion::Jdk17,
            Language::Groovy,
        )
        .unwrap_err();
        assert!(err.contains("junit"));
        assert!(err.contains("spock"));
    }

    #[test]
    fn plugin_with_gorm_is_rejected() {
        let err = validate_options(
            ApplicationType::Plugin,
            BuildTool::Gradle,
            TestFramework::Spock,
            Some(GormImpl::Mongodb),
            JdkVersion::Jdk17,
            Language::Groovy,
        )
        .unwrap_err();
        assert!(err.contains("mongodb"));
    }

    #[test]
    fn spock_with_kotlin_is_rejected() {
        let err = validate_options(
            ApplicationType::Web,
            BuildTool::Gradle,
            TestFramework::Spock,
            None,
            JdkVersion::Jdk17,
            Language::Kotlin,
        )
        .unwrap_err();
        assert!(err.contains("kotlin"));
    }

    #[test]
    fn kotlin_dsl_needs_jdk_11() {
        assert!(
            validate_options(
                ApplicationType::Web,
                BuildTool::GradleKotlin,
                TestFramework::Junit,
                None,
                JdkVersion::Jdk8,
                Language::Kotlin,
            )
            .is_err()
        );
        assert!(
            validate_options(
                ApplicationType::Web,
                BuildTool::GradleKotlin,
                TestFramework::Junit,
                None,
                JdkVersion::Jdk11,
                Language::Kotlin,
            )
            .is_ok()
        );
    }
}
