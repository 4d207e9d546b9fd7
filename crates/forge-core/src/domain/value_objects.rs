//! Option value objects: ApplicationType, BuildTool, TestFramework, GormImpl,
//! JdkVersion, Language.
//!
//! # Design
//!
//! These are pure `Copy` value types compared by value.
//! They hold NO compatibility logic. All compatibility and inference lives in
//! `capabilities.rs`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a capability entry in `capabilities.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ApplicationType ──────────────────────────────────────────────────────────

/// The kind of application to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationType {
    /// Full web application with views.
    #[default]
    Web,
    /// Web application without views, JSON only.
    RestApi,
    /// Plugin that ships controllers and views.
    WebPlugin,
    /// Plain plugin.
    Plugin,
}

impl ApplicationType {
    pub const ALL: [Self; 4] = [Self::Web, Self::RestApi, Self::WebPlugin, Self::Plugin];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::RestApi => "rest-api",
            Self::WebPlugin => "web-plugin",
            Self::Plugin => "plugin",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "web" | "default" | "app" => Ok(Self::Web),
            "rest-api" | "rest" | "api" => Ok(Self::RestApi),
            "web-plugin" => Ok(Self::WebPlugin),
            "plugin" => Ok(Self::Plugin),
            other => Err(DomainError::InvalidOption(format!(
                "unknown application type: {other}"
            ))),
        }
    }
}

// ── BuildTool ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildTool {
    #[default]
    Gradle,
    GradleKotlin,
}

impl BuildTool {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gradle => "gradle",
            Self::GradleKotlin => "gradle-kotlin",
        }
    }

    /// Name of the build script this tool reads.
    pub const fn build_file(&self) -> &'static str {
        match self {
            Self::Gradle => "build.gradle",
            Self::GradleKotlin => "build.gradle.kts",
        }
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildTool {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "gradle" | "gradle-groovy" => Ok(Self::Gradle),
            "gradle-kotlin" | "kts" => Ok(Self::GradleKotlin),
            other => Err(DomainError::InvalidOption(format!(
                "unknown build tool: {other}"
            ))),
        }
    }
}

// ── TestFramework ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    Spock,
    Junit,
}

impl TestFramework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spock => "spock",
            Self::Junit => "junit",
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spock" => Ok(Self::Spock),
            "junit" | "junit5" => Ok(Self::Junit),
            other => Err(DomainError::InvalidOption(format!(
                "unknown test framework: {other}"
            ))),
        }
    }
}

// ── GormImpl ─────────────────────────────────────────────────────────────────

/// Data-mapping implementation backing the domain classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GormImpl {
    Hibernate,
    Mongodb,
    Neo4j,
}

impl GormImpl {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hibernate => "hibernate",
            Self::Mongodb => "mongodb",
            Self::Neo4j => "neo4j",
        }
    }

    /// Whether this implementation talks to a relational database.
    pub const fn is_relational(&self) -> bool {
        matches!(self, Self::Hibernate)
    }
}

impl fmt::Display for GormImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GormImpl {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "hibernate" | "gorm-hibernate" => Ok(Self::Hibernate),
            "mongodb" | "mongo" | "gorm-mongodb" => Ok(Self::Mongodb),
            "neo4j" | "gorm-neo4j" => Ok(Self::Neo4j),
            other => Err(DomainError::InvalidOption(format!(
                "unknown GORM implementation: {other}"
            ))),
        }
    }
}

// ── JdkVersion ───────────────────────────────────────────────────────────────

/// Target Java runtime version.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum JdkVersion {
    #[serde(rename = "8")]
    Jdk8,
    #[serde(rename = "11")]
    Jdk11,
    #[default]
    #[serde(rename = "17")]
    Jdk17,
    #[serde(rename = "21")]
    Jdk21,
}

impl JdkVersion {
    pub const fn major_version(&self) -> u32 {
        match self {
            Self::Jdk8 => 8,
            Self::Jdk11 => 11,
            Self::Jdk17 => 17,
            Self::Jdk21 => 21,
        }
    }

    pub fn from_major(major: u32) -> Result<Self, DomainError> {
        match major {
            8 => Ok(Self::Jdk8),
            11 => Ok(Self::Jdk11),
            17 => Ok(Self::Jdk17),
            21 => Ok(Self::Jdk21),
            other => Err(DomainError::InvalidOption(format!(
                "unsupported JDK version: {other} (supported: 8, 11, 17, 21)"
            ))),
        }
    }
}

impl fmt::Display for JdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major_version())
    }
}

impl FromStr for JdkVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let digits = lower
            .trim_start_matches("jdk")
            .trim_start_matches(['_', '-']);
        let major = digits.parse::<u32>().map_err(|_| {
            DomainError::InvalidOption(format!("unknown JDK version: {s}"))
        })?;
        Self::from_major(major)
    }
}

// ── Language ─────────────────────────────────────────────────────────────────

/// Source language of the generated application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Groovy,
    Java,
    Kotlin,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Groovy => "groovy",
            Self::Java => "java",
            Self::Kotlin => "kotlin",
        }
    }

    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::Groovy => "groovy",
            Self::Java => "java",
            Self::Kotlin => "kt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groovy" => Ok(Self::Groovy),
            "java" => Ok(Self::Java),
            "kotlin" | "kt" => Ok(Self::Kotlin),
            other => Err(DomainError::InvalidOption(format!(
                "unknown language: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_type_from_str_accepts_aliases() {
        assert_eq!("web".parse::<ApplicationType>().unwrap(), ApplicationType::Web);
        assert_eq!(
            "REST_API".parse::<ApplicationType>().unwrap(),
            ApplicationType::RestApi
        );
        assert_eq!(
            "api".parse::<ApplicationType>().unwrap(),
            ApplicationType::RestApi
        );
        assert!("desktop".parse::<ApplicationType>().is_err());
    }

    #[test]
    fn application_type_display_is_kebab_case() {
        assert_eq!(ApplicationType::WebPlugin.to_string(), "web-plugin");
        assert_eq!(ApplicationType::RestApi.to_string(), "rest-api");
    }

    #[test]
    fn jdk_version_parses_common_spellings() {
        assert_eq!("17".parse::<JdkVersion>().unwrap(), JdkVersion::Jdk17);
        assert_eq!("jdk11".parse::<JdkVersion>().unwrap(), JdkVersion::Jdk11);
        assert_eq!("JDK_21".parse::<JdkVersion>().unwrap(), JdkVersion::Jdk21);
        assert!("9".parse::<JdkVersion>().is_err());
        assert!("latest".parse::<JdkVersion>().is_err());
    }

    #[test]
    fn jdk_versions_are_ordered_by_major() {
        assert!(JdkVersion::Jdk8 < JdkVersion::Jdk11);
        assert!(JdkVersion::Jdk17 < JdkVersion::Jdk21);
        assert_eq!(JdkVersion::Jdk17.major_version(), 17);
        assert_eq!(JdkVersion::default(), JdkVersion::Jdk17);
    }

    #[test]
    fn gorm_from_str_accepts_prefixed_names() {
        assert_eq!("gorm-mongodb".parse::<GormImpl>().unwrap(), GormImpl::Mongodb);
        assert_eq!("mongo".parse::<GormImpl>().unwrap(), GormImpl::Mongodb);
        assert!(GormImpl::Hibernate.is_relational());
        assert!(!GormImpl::Neo4j.is_relational());
    }

    #[test]
    fn build_tool_knows_its_build_file() {
        assert_eq!(BuildTool::Gradle.build_file(), "build.gradle");
        assert_eq!(BuildTool::GradleKotlin.build_file(), "build.gradle.kts");
    }

    #[test]
    fn language_from_str_unknown_errors() {
        assert_eq!("kt".parse::<Language>().unwrap(), Language::Kotlin);
        assert!("scala".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }
}
