//! The feature contract.
//!
//! A feature is a named, independently authored unit that takes part in
//! resolution through [`Feature::process_selected_features`] and contributes
//! artifacts through [`Feature::apply`]. Nothing else couples a feature to
//! the engine.
//!
//! Features are process-wide and stateless. The catalog hands them out as
//! `Arc<dyn Feature>` and many runs may hold the same instance at once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{feature_context::FeatureContext, generator_context::GeneratorContext},
    error::DomainError,
    value_objects::ApplicationType,
};

pub trait Feature: Send + Sync + fmt::Debug {
    /// Unique, case-sensitive identifier.
    fn name(&self) -> &str;

    fn title(&self) -> &str;

    fn description(&self) -> &str;

    /// Hidden features are left out of listings but may still be pulled in
    /// transitively. Visibility never affects resolution.
    fn is_visible(&self) -> bool {
        true
    }

    fn documentation(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::Other
    }

    /// Whether listings should offer this feature for the given type.
    fn supports(&self, _application_type: ApplicationType) -> bool {
        true
    }

    /// Pre-resolution hook.
    ///
    /// Runs once per resolution pass while the feature is selected, so it
    /// must give the same answer for the same context. Implied features are
    /// kept only while some selected feature keeps requesting them, so
    /// request them on every run.
    fn process_selected_features(&self, _context: &mut FeatureContext) {}

    /// Contribution hook. Called once, after resolution has converged.
    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError>;
}

// ── Category ─────────────────────────────────────────────────────────────────

/// Grouping used by listings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureCategory {
    Server,
    Database,
    Messaging,
    Serialization,
    DevTools,
    Build,
    #[default]
    Other,
}

impl FeatureCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Database => "database",
            Self::Messaging => "messaging",
            Self::Serialization => "serialization",
            Self::DevTools => "dev-tools",
            Self::Build => "build",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "server" => Ok(Self::Server),
            "database" | "db" => Ok(Self::Database),
            "messaging" => Ok(Self::Messaging),
            "serialization" => Ok(Self::Serialization),
            "dev-tools" | "devtools" => Ok(Self::DevTools),
            "build" => Ok(Self::Build),
            "other" => Ok(Self::Other),
            other => Err(DomainError::InvalidOption(format!(
                "unknown feature category: {other}"
            ))),
        }
    }
}

// ── Listing DTO ──────────────────────────────────────────────────────────────

/// Information about a feature for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: FeatureCategory,
    pub visible: bool,
    pub documentation: Option<String>,
}

impl FeatureInfo {
    pub fn from_feature(feature: &dyn Feature) -> Self {
        Self {
            name: feature.name().to_string(),
            title: feature.title().to_string(),
            description: feature.description().to_string(),
            category: feature.category(),
            visible: feature.is_visible(),
            documentation: feature.documentation().map(str::to_string),
        }
    }
}
