//! Artifact descriptors and the registry the assembler produces.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::common::RelativePath;

/// Template text for a rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the binary.
    Static(&'static str),
    /// Loaded at runtime, e.g. from a feature manifest.
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

/// A single unit of generated output.
///
/// Either text rendered from a template against the run's model (plus the
/// artifact's own variables), or an opaque binary resource copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Rendered {
        path: RelativePath,
        template: TemplateSource,
        variables: BTreeMap<String, String>,
        executable: bool,
    },
    Binary {
        path: RelativePath,
        /// Reference handed to the `ByteSource` port.
        resource: String,
        executable: bool,
    },
}

impl Artifact {
    pub fn rendered(path: RelativePath, template: impl Into<TemplateSource>) -> Self {
        Self::Rendered {
            path,
            template: template.into(),
            variables: BTreeMap::new(),
            executable: false,
        }
    }

    pub fn binary(path: RelativePath, resource: impl Into<String>) -> Self {
        Self::Binary {
            path,
            resource: resource.into(),
            executable: false,
        }
    }

    /// Add an artifact-local template variable. No effect on binaries.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Rendered { variables, .. } = &mut self {
            variables.insert(key.into(), value.into());
        }
        self
    }

    pub fn executable(mut self) -> Self {
        match &mut self {
            Self::Rendered { executable, .. } | Self::Binary { executable, .. } => {
                *executable = true;
            }
        }
        self
    }

    pub fn path(&self) -> &RelativePath {
        match self {
            Self::Rendered { path, .. } | Self::Binary { path, .. } => path,
        }
    }

    pub fn is_executable(&self) -> bool {
        match self {
            Self::Rendered { executable, .. } | Self::Binary { executable, .. } => *executable,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Rendered { .. } => ArtifactKind::Rendered,
            Self::Binary { .. } => ArtifactKind::Binary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Rendered,
    Binary,
}

/// An artifact together with the feature that registered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredArtifact {
    pub artifact: Artifact,
    pub contributed_by: String,
}

/// Final artifact collection of one run, ordered by artifact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactRegistry {
    entries: BTreeMap<String, RegisteredArtifact>,
}

impl ArtifactRegistry {
    pub(crate) fn from_entries(entries: BTreeMap<String, RegisteredArtifact>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.entries.get(name).map(|e| &e.artifact)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn contributed_by(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.contributed_by.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredArtifact)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
