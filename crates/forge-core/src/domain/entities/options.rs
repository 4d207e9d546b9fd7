//! The `Options` value and its typestate builder.
//!
//! `Options` is the closed set of choices that drives one generation run.
//! It is `Copy`: the resolver hands the same value to every hook, so no hook
//! can observe a different option set than another.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoType` / `HasType`) to
//! enforce at *compile time* that the application type is chosen first,
//! since every default (test framework, GORM) is inferred from it.
//!
//! Building never checks compatibility. That is the job of the
//! `CompatibilityChecker` port, which the resolver consults before any
//! feature hook runs; `validate` is the registry-backed implementation.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::domain::{
    capabilities,
    error::DomainError,
    value_objects::{ApplicationType, BuildTool, GormImpl, JdkVersion, Language, TestFramework},
};

// ── Value ─────────────────────────────────────────────────────────────────────

/// The option set of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Options {
    application_type: ApplicationType,
    build_tool: BuildTool,
    test_framework: TestFramework,
    gorm: Option<GormImpl>,
    jdk: JdkVersion,
    language: Language,
}

impl Options {
    /// Start building a new `Options` value.
    pub fn builder() -> OptionsBuilder<NoType> {
        OptionsBuilder::new()
    }

    pub const fn application_type(&self) -> ApplicationType {
        self.application_type
    }
    pub const fn build_tool(&self) -> BuildTool {
        self.build_tool
    }
    pub const fn test_framework(&self) -> TestFramework {
        self.test_framework
    }
    pub const fn gorm(&self) -> Option<GormImpl> {
        self.gorm
    }
    pub const fn jdk(&self) -> JdkVersion {
        self.jdk
    }
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Check this combination against the capability registry.
    pub fn validate(&self) -> Result<(), DomainError> {
        capabilities::validate_options(
            self.application_type,
            self.build_tool,
            self.test_framework,
            self.gorm,
            self.jdk,
            self.language,
        )
        .map_err(|reason| DomainError::IncompatibleOptions { reason })
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::builder()
            .application_type(ApplicationType::default())
            .build()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {}, JDK {}",
            self.application_type, self.language, self.build_tool, self.test_framework, self.jdk
        )?;
        if let Some(gorm) = self.gorm {
            write!(f, ", gorm-{gorm}")?;
        }
        f.write_str(")")
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: application type has not yet been set.
pub struct NoType;
/// Marker: application type has been set; other fields may now be configured.
pub struct HasType;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`Options`].
pub struct OptionsBuilder<T> {
    application_type: Option<ApplicationType>,
    build_tool: Option<BuildTool>,
    test_framework: Option<TestFramework>,
    gorm: Option<Option<GormImpl>>,
    jdk: Option<JdkVersion>,
    language: Option<Language>,
    _marker: PhantomData<T>,
}

impl OptionsBuilder<NoType> {
    pub fn new() -> Self {
        Self {
            application_type: None,
            build_tool: None,
            test_framework: None,
            gorm: None,
            jdk: None,
            language: None,
            _marker: PhantomData,
        }
    }

    /// Set the application type. This transitions the builder to `HasType`.
    pub fn application_type(self, application_type: ApplicationType) -> OptionsBuilder<HasType> {
        OptionsBuilder {
            application_type: Some(application_type),
            build_tool: self.build_tool,
            test_framework: self.test_framework,
            gorm: self.gorm,
            jdk: self.jdk,
            language: self.language,
            _marker: PhantomData,
        }
    }
}

impl Default for OptionsBuilder<NoType> {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsBuilder<HasType> {
    pub fn build_tool(mut self, build_tool: BuildTool) -> Self {
        self.build_tool = Some(build_tool);
        self
    }

    pub fn test_framework(mut self, test_framework: TestFramework) -> Self {
        self.test_framework = Some(test_framework);
        self
    }

    /// Pick a GORM implementation explicitly.
    pub fn gorm(mut self, gorm: GormImpl) -> Self {
        self.gorm = Some(Some(gorm));
        self
    }

    /// Generate without any GORM implementation, overriding the inferred default.
    pub fn without_gorm(mut self) -> Self {
        self.gorm = Some(None);
        self
    }

    pub fn jdk(mut self, jdk: JdkVersion) -> Self {
        self.jdk = Some(jdk);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Fill every unset field with its inferred default.
    pub fn build(self) -> Options {
        let application_type = self
            .application_type
            .expect("typestate guarantees application type is set");

        Options {
            application_type,
            build_tool: self.build_tool.unwrap_or_default(),
            test_framework: self
                .test_framework
                .unwrap_or_else(|| capabilities::infer_test_framework(application_type)),
            gorm: self
                .gorm
                .unwrap_or_else(|| capabilities::infer_gorm(application_type)),
            jdk: self.jdk.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_infers_defaults_from_application_type() {
        let options = Options::builder()
            .application_type(ApplicationType::Web)
            .build();

        assert_eq!(options.test_framework(), TestFramework::Spock);
        assert_eq!(options.gorm(), Some(GormImpl::Hibernate));
        assert_eq!(options.jdk(), JdkVersion::Jdk17);
        assert_eq!(options.language(), Language::Groovy);
        assert_eq!(options.build_tool(), BuildTool::Gradle);
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let options = Options::builder()
            .application_type(ApplicationType::RestApi)
            .test_framework(TestFramework::Junit)
            .gorm(GormImpl::Mongodb)
            .jdk(JdkVersion::Jdk11)
            .language(Language::Java)
            .build();

        assert_eq!(options.test_framework(), TestFramework::Junit);
        assert_eq!(options.gorm(), Some(GormImpl::Mongodb));
        assert_eq!(options.jdk().major_version(), 11);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn without_gorm_clears_inferred_default() {
        let options = Options::builder()
            .application_type(ApplicationType::Web)
            .without_gorm()
            .build();
        assert_eq!(options.gorm(), None);
    }

    #[test]
    fn validate_reports_incompatible_combination() {
        let options = Options::builder()
            .application_type(ApplicationType::Plugin)
            .test_framework(TestFramework::Junit)
            .build();

        assert!(matches!(
            options.validate(),
            Err(DomainError::IncompatibleOptions { .. })
        ));
    }

    #[test]
    fn display_mentions_every_choice() {
        let shown = Options::default().to_string();
        assert!(shown.contains("web"));
        assert!(shown.contains("JDK 17"));
        assert!(shown.contains("gorm-hibernate"));
    }
}
