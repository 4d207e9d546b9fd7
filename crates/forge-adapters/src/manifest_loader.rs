//! Data-driven features loaded from `feature.toml` manifests.
//!
//! Every `feature.toml` found by walking the features directory defines one
//! feature. Template files referenced by a manifest are read relative to the
//! manifest's own directory at load time.
//!
//! # `feature.toml` format
//!
//! ```toml
//! [feature]
//! name          = "mongo-sync"                  # unique, case-sensitive
//! title         = "MongoDB Sync Driver"
//! description   = "Adds the synchronous MongoDB driver"
//! category      = "database"                    # optional, defaults to "other"
//! visible       = true                          # optional
//! documentation = "https://example.com/mongo"   # optional
//! application_types = ["web", "rest-api"]       # optional; listing filter only
//! implies       = ["jackson"]                   # optional; pulled in when selected
//!
//! # Optional. The feature removes itself outside these bounds.
//! [exclude]
//! min_jdk  = 11
//! max_jdk  = 21
//! gorm     = ["hibernate"]                      # removes itself for these
//! features = ["h2"]                             # removes these when selected
//!
//! [[artifacts]]
//! name     = "mongoConfig"
//! path     = "grails-app/conf/mongo.yml"
//! template = "mongo.yml"                        # or `text = "..."`, or `resource = "..."`
//! executable = false                            # optional
//! override   = false                            # optional; replace another feature's artifact
//! variables  = { DATABASE = "{{PROJECT_NAME_SNAKE}}" }
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use forge_core::domain::{
    ApplicationType, Artifact, DomainError, Feature, FeatureCategory, FeatureContext,
    FeaturePredicate, GeneratorContext, GormImpl, JdkVersion, RelativePath,
};

pub const MANIFEST_FILE: &str = "feature.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FeatureManifest {
    pub feature: FeatureSection,
    #[serde(default)]
    pub exclude: ExcludeSection,
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
}

/// `[feature]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FeatureSection {
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub visible: Option<bool>,
    pub documentation: Option<String>,
    pub application_types: Option<Vec<String>>,
    #[serde(default)]
    pub implies: Vec<String>,
}

/// `[exclude]` section.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ExcludeSection {
    pub min_jdk: Option<u32>,
    pub max_jdk: Option<u32>,
    #[serde(default)]
    pub gorm: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// One `[[artifacts]]` entry. Exactly one of `template`, `text` and
/// `resource` must be set.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ArtifactEntry {
    pub name: String,
    pub path: String,
    pub template: Option<String>,
    pub text: Option<String>,
    pub resource: Option<String>,
    #[serde(default)]
    pub executable: bool,
    #[serde(default, rename = "override")]
    pub replaces: bool,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

// ── Feature ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct ManifestArtifact {
    name: String,
    artifact: Artifact,
    replaces: bool,
}

/// A feature defined by a `feature.toml` manifest.
#[derive(Debug, Clone)]
pub struct ManifestFeature {
    name: String,
    title: String,
    description: String,
    category: FeatureCategory,
    visible: bool,
    documentation: Option<String>,
    application_types: Option<Vec<ApplicationType>>,
    min_jdk: Option<JdkVersion>,
    max_jdk: Option<JdkVersion>,
    excluded_gorm: Vec<GormImpl>,
    excludes: Vec<String>,
    implies: Vec<String>,
    artifacts: Vec<ManifestArtifact>,
}

impl ManifestFeature {
    /// Build a feature from a parsed manifest. `base_dir` anchors template
    /// file references.
    pub fn from_manifest(manifest: FeatureManifest, base_dir: &Path) -> Result<Self, DomainError> {
        let FeatureManifest {
            feature,
            exclude,
            artifacts,
        } = manifest;

        if feature.name.trim().is_empty() || feature.name.contains(char::is_whitespace) {
            return Err(invalid(format!(
                "feature name '{}' must be non-empty without whitespace",
                feature.name
            )));
        }

        let category = feature
            .category
            .as_deref()
            .map(str::parse::<FeatureCategory>)
            .transpose()?
            .unwrap_or_default();

        let application_types = feature
            .application_types
            .map(|types| {
                types
                    .iter()
                    .map(|t| t.parse::<ApplicationType>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let min_jdk = exclude.min_jdk.map(JdkVersion::from_major).transpose()?;
        let max_jdk = exclude.max_jdk.map(JdkVersion::from_major).transpose()?;
        if let (Some(min), Some(max)) = (min_jdk, max_jdk) {
            if min > max {
                return Err(invalid(format!(
                    "feature '{}' has min_jdk {min} above max_jdk {max}",
                    feature.name
                )));
            }
        }

        let excluded_gorm = exclude
            .gorm
            .iter()
            .map(|g| g.parse::<GormImpl>())
            .collect::<Result<Vec<_>, _>>()?;

        let artifacts = artifacts
            .into_iter()
            .map(|entry| load_artifact(entry, base_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: feature.name,
            title: feature.title,
            description: feature.description,
            category,
            visible: feature.visible.unwrap_or(true),
            documentation: feature.documentation,
            application_types,
            min_jdk,
            max_jdk,
            excluded_gorm,
            excludes: exclude.features,
            implies: feature.implies,
            artifacts,
        })
    }

    fn unsupported_reason(&self, context: &FeatureContext) -> Option<String> {
        let options = context.options();
        let jdk = options.jdk();

        let jdk_out_of_range = self.min_jdk.is_some_and(|min| jdk < min)
            || self.max_jdk.is_some_and(|max| jdk > max);
        if jdk_out_of_range {
            return Some(format!("JDK {jdk}"));
        }

        options
            .gorm()
            .filter(|gorm| self.excluded_gorm.contains(gorm))
            .map(|gorm| format!("GORM {gorm}"))
    }
}

fn load_artifact(entry: ArtifactEntry, base_dir: &Path) -> Result<ManifestArtifact, DomainError> {
    let path = RelativePath::try_new(&entry.path)?;

    let artifact = match (entry.template, entry.text, entry.resource) {
        (Some(template), None, None) => {
            let file = base_dir.join(RelativePath::try_new(&template)?.to_path_buf());
            let body = fs::read_to_string(&file).map_err(|e| {
                invalid(format!("failed to read template '{}': {e}", file.display()))
            })?;
            Artifact::rendered(path, body)
        }
        (None, Some(text), None) => Artifact::rendered(path, text),
        (None, None, Some(resource)) => Artifact::binary(path, resource),
        _ => {
            return Err(invalid(format!(
                "artifact '{}' needs exactly one of template, text or resource",
                entry.name
            )));
        }
    };

    let artifact = entry
        .variables
        .into_iter()
        .fold(artifact, |artifact, (key, value)| artifact.with_variable(key, value));
    let artifact = if entry.executable {
        artifact.executable()
    } else {
        artifact
    };

    Ok(ManifestArtifact {
        name: entry.name,
        artifact,
        replaces: entry.replaces,
    })
}

fn invalid(message: String) -> DomainError {
    DomainError::InvalidManifest(message)
}

impl Feature for ManifestFeature {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    fn category(&self) -> FeatureCategory {
        self.category
    }

    fn supports(&self, application_type: ApplicationType) -> bool {
        self.application_types
            .as_ref()
            .is_none_or(|types| types.contains(&application_type))
    }

    fn process_selected_features(&self, context: &mut FeatureContext) {
        if let Some(reason) = self.unsupported_reason(context) {
            context.exclude(FeaturePredicate::excluding(&self.name).with_warning(format!(
                "{} was excluded because it does not support {reason}",
                self.name
            )));
            return;
        }

        for other in &self.excludes {
            if context.is_selected(other) {
                context.exclude(FeaturePredicate::excluding(other).with_warning(format!(
                    "{other} was excluded because {} is selected",
                    self.name
                )));
            }
        }

        for implied in &self.implies {
            context.request_feature(implied.as_str());
        }
    }

    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        for entry in &self.artifacts {
            if entry.replaces {
                context.override_artifact(entry.name.as_str(), entry.artifact.clone())?;
            } else {
                context.add_artifact(entry.name.as_str(), entry.artifact.clone())?;
            }
        }
        Ok(())
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`ManifestFeature`]s from every `feature.toml` under a directory.
///
/// Manifests that fail to parse or validate emit a `WARN` log and are
/// skipped. Results are ordered by manifest path.
pub struct ManifestFeatureLoader {
    features_dir: PathBuf,
}

impl ManifestFeatureLoader {
    pub fn new(features_dir: impl Into<PathBuf>) -> Self {
        Self {
            features_dir: features_dir.into(),
        }
    }

    /// Load every valid manifest.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidManifest`] if the directory does not exist.
    #[instrument(skip(self), fields(dir = %self.features_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Arc<dyn Feature>>, DomainError> {
        if !self.features_dir.is_dir() {
            return Err(invalid(format!(
                "features directory not found: {}",
                self.features_dir.display()
            )));
        }

        let mut features: Vec<Arc<dyn Feature>> = Vec::new();

        let manifests = WalkDir::new(&self.features_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE);

        for entry in manifests {
            match load_manifest(entry.path()) {
                Ok(feature) => {
                    debug!(feature = feature.name(), path = %entry.path().display(), "loaded manifest feature");
                    features.push(Arc::new(feature));
                }
                Err(e) => {
                    warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "skipping feature manifest due to load error"
                    );
                }
            }
        }

        debug!(count = features.len(), "finished loading manifests");
        Ok(features)
    }
}

fn load_manifest(path: &Path) -> Result<ManifestFeature, DomainError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| invalid(format!("failed to read '{}': {e}", path.display())))?;
    let manifest: FeatureManifest = toml::from_str(&raw)
        .map_err(|e| invalid(format!("failed to parse '{}': {e}", path.display())))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    ManifestFeature::from_manifest(manifest, base_dir)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
