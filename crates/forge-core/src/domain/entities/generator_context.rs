//! Generation-scoped artifact accumulator.
//!
//! Registration is first-write-only: a second `add_artifact` under a taken
//! name is an `ArtifactNameCollision`. A feature that means to replace
//! another feature's artifact says so with `override_artifact`; overrides
//! are held back and applied by `finish`, so the outcome never depends on
//! the order in which features contributed.

use std::collections::{BTreeMap, btree_map::Entry};

use tracing::trace;

use crate::domain::{
    entities::{
        artifact::{Artifact, ArtifactRegistry, RegisteredArtifact},
        common::ProjectName,
        options::Options,
    },
    error::DomainError,
};

#[derive(Debug)]
pub struct GeneratorContext {
    options: Options,
    project: ProjectName,
    features: Vec<String>,
    contributor: String,
    artifacts: BTreeMap<String, RegisteredArtifact>,
    overrides: BTreeMap<String, RegisteredArtifact>,
}

impl GeneratorContext {
    pub fn new(options: Options, project: ProjectName, features: Vec<String>) -> Self {
        Self {
            options,
            project,
            features,
            contributor: String::new(),
            artifacts: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    /// Whether `name` survived resolution.
    pub fn is_feature_present(&self, name: &str) -> bool {
        self.features.iter().any(|f| f == name)
    }

    /// Resolved feature names, in resolution order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Attribute subsequent registrations to `feature`.
    pub fn begin_contribution(&mut self, feature: &str) {
        self.contributor = feature.to_string();
    }

    /// Register a new artifact under `name`.
    pub fn add_artifact(
        &mut self,
        name: impl Into<String>,
        artifact: Artifact,
    ) -> Result<(), DomainError> {
        let name = name.into();
        match self.artifacts.entry(name) {
            Entry::Occupied(existing) => Err(DomainError::ArtifactNameCollision {
                name: existing.key().clone(),
                first_feature: existing.get().contributed_by.clone(),
                second_feature: self.contributor.clone(),
            }),
            Entry::Vacant(slot) => {
                trace!(artifact = %slot.key(), feature = %self.contributor, "artifact registered");
                slot.insert(RegisteredArtifact {
                    artifact,
                    contributed_by: self.contributor.clone(),
                });
                Ok(())
            }
        }
    }

    /// Replace the artifact another feature registered under `name`.
    pub fn override_artifact(
        &mut self,
        name: impl Into<String>,
        artifact: Artifact,
    ) -> Result<(), DomainError> {
        let name = name.into();
        match self.overrides.entry(name) {
            Entry::Occupied(existing) => Err(DomainError::ArtifactNameCollision {
                name: existing.key().clone(),
                first_feature: existing.get().contributed_by.clone(),
                second_feature: self.contributor.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(RegisteredArtifact {
                    artifact,
                    contributed_by: self.contributor.clone(),
                });
                Ok(())
            }
        }
    }

    pub fn has_artifact(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }

    /// Apply pending overrides and hand over the registry.
    pub fn finish(self) -> Result<ArtifactRegistry, DomainError> {
        let mut artifacts = self.artifacts;

        for (name, replacement) in self.overrides {
            match artifacts.get_mut(&name) {
                Some(slot) => *slot = replacement,
                None => {
                    return Err(DomainError::OverrideTargetMissing {
                        name,
                        feature: replacement.contributed_by,
                    });
                }
            }
        }

        Ok(ArtifactRegistry::from_entries(artifacts))
    }
}
