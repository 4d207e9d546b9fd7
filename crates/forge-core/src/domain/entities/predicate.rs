use std::fmt;

use crate::domain::entities::feature::Feature;

/// An exclusion rule registered during resolution.
///
/// A plain value: the name of the feature to remove plus an optional
/// warning. It is never evaluated inside the hook that creates it; the
/// resolver applies every pending predicate in one sweep at the end of the
/// pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeaturePredicate {
    target: String,
    warning: Option<String>,
}

impl FeaturePredicate {
    /// Exclude the feature called `name`.
    pub fn excluding(name: impl Into<String>) -> Self {
        Self {
            target: name.into(),
            warning: None,
        }
    }

    /// Attach the message surfaced when this predicate removes a feature.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn test(&self, feature: &dyn Feature) -> bool {
        self.matches_name(feature.name())
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.target == name
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

impl fmt::Display for FeaturePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exclude {}", self.target)
    }
}
