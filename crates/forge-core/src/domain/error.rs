// ============================================================================
// domain/error.rs - RESOLUTION AND ASSEMBLY ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `ForgeError`, which is `Clone`)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Caller input errors
    // ========================================================================
    #[error("unknown feature '{name}'")]
    UnknownFeature { name: String },

    #[error("incompatible options: {reason}")]
    IncompatibleOptions { reason: String },

    #[error("invalid option value: {0}")]
    InvalidOption(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("path '{path}' escapes the project root")]
    PathEscapesRoot { path: String },

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ========================================================================
    // Feature authoring defects
    // ========================================================================
    #[error(
        "feature resolution did not converge after {passes} passes (still selected: {})",
        .remaining.join(", ")
    )]
    ResolutionDidNotConverge {
        passes: usize,
        remaining: Vec<String>,
    },

    #[error(
        "artifact '{name}' registered by both '{first_feature}' and '{second_feature}'"
    )]
    ArtifactNameCollision {
        name: String,
        first_feature: String,
        second_feature: String,
    },

    #[error("feature '{feature}' overrides artifact '{name}' but no feature registered it")]
    OverrideTargetMissing { name: String, feature: String },

    #[error("feature '{name}' is registered more than once")]
    DuplicateFeature { name: String },

    #[error("invalid feature manifest: {0}")]
    InvalidManifest(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFeature { name } => vec![
                format!("No feature named '{name}' exists (names are case-sensitive)"),
                "Try: forge list --all".into(),
            ],
            Self::IncompatibleOptions { reason } => vec![
                "The selected options cannot be combined".into(),
                format!("Details: {reason}"),
                "Drop the conflicting flag to fall back to the default".into(),
            ],
            Self::InvalidOption(msg) => vec![
                format!("Check your option values: {msg}"),
                "Use --help to see the accepted values".into(),
            ],
            Self::ResolutionDidNotConverge { remaining, .. } => vec![
                "Two or more features keep re-including and excluding each other".into(),
                format!("Features involved: {}", remaining.join(", ")),
                "This is a bug in the feature catalog, please report it".into(),
            ],
            Self::ArtifactNameCollision {
                first_feature,
                second_feature,
                ..
            } => vec![
                format!("'{first_feature}' and '{second_feature}' write the same artifact"),
                "Remove one of them from --features".into(),
                "This is a bug in the feature catalog, please report it".into(),
            ],
            Self::DuplicateFeature { name } => vec![
                format!("Rename one of the features called '{name}'"),
                "Check the manifests in your local features directory".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Start with a letter, then use letters, digits, '-', '_' or '.'".into(),
                "Example: forge create my-app".into(),
            ],
            Self::InvalidManifest(msg) => vec![
                format!("Manifest problem: {msg}"),
                "See feature.toml format in the forge-adapters docs".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOption(_)
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::InvalidProjectName { .. } => ErrorCategory::Validation,
            Self::IncompatibleOptions { .. } => ErrorCategory::Compatibility,
            Self::UnknownFeature { .. } => ErrorCategory::NotFound,
            Self::InvalidManifest(_) | Self::DuplicateFeature { .. } => {
                ErrorCategory::Validation
            }
            Self::ResolutionDidNotConverge { .. }
            | Self::ArtifactNameCollision { .. }
            | Self::OverrideTargetMissing { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the error points at a defect in feature authoring rather than
    /// at the caller's input.
    pub fn is_authoring_defect(&self) -> bool {
        matches!(
            self,
            Self::ResolutionDidNotConverge { .. }
                | Self::ArtifactNameCollision { .. }
                | Self::OverrideTargetMissing { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_feature_names_the_identifier() {
        let err = DomainError::UnknownFeature {
            name: "does-not-exist".into(),
        };
        assert!(err.to_string().contains("does-not-exist"));
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.is_authoring_defect());
    }

    #[test]
    fn collision_names_both_features_and_artifact() {
        let err = DomainError::ArtifactNameCollision {
            name: "applicationYml".into(),
            first_feature: "web".into(),
            second_feature: "rest".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("applicationYml"));
        assert!(msg.contains("web"));
        assert!(msg.contains("rest"));
        assert!(err.is_authoring_defect());
    }

    #[test]
    fn non_convergence_lists_remaining_features() {
        let err = DomainError::ResolutionDidNotConverge {
            passes: 16,
            remaining: vec!["a".into(), "b".into()],
        };
        assert!(err.to_string().contains("a, b"));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
