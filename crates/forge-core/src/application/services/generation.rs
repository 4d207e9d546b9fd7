//! Generation Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Resolve the requested features against the options
//! 2. Assemble the artifact registry
//! 3. Materialize artifacts (render templates, read binaries)
//! 4. Write to filesystem, or return the contents as a preview
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{ByteSource, CompatibilityChecker, FeatureCatalog, Filesystem, TemplateRenderer},
        services::{
            assembler::Assembler,
            compatibility::RegistryCompatibilityChecker,
            resolver::{FeatureResolver, Resolution},
        },
    },
    domain::{
        ApplicationType, Artifact, ArtifactRegistry, DomainValidator as validator, FeatureInfo,
        FileContent, Options, ProjectName, ProjectStructure, RenderModel,
    },
    error::ForgeResult,
};

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub project_name: String,
    pub features: Vec<String>,
    pub options: Options,
}

impl GenerationRequest {
    pub fn new(project_name: impl Into<String>, options: Options) -> Self {
        Self {
            project_name: project_name.into(),
            features: Vec::new(),
            options,
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of writing a project to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub features: Vec<String>,
    pub warnings: Vec<String>,
    pub files_written: usize,
}

/// In-memory rendition of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub project_name: String,
    pub options: Options,
    pub features: Vec<String>,
    pub warnings: Vec<String>,
    /// Destination path to content. Binaries appear as `<binary: N bytes>`.
    pub files: BTreeMap<String, String>,
}

/// Listing filter for `list_features`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureFilter {
    pub application_type: Option<ApplicationType>,
    pub include_hidden: bool,
}

/// Main generation service.
pub struct GenerationService {
    catalog: Arc<dyn FeatureCatalog>,
    resolver: FeatureResolver,
    assembler: Assembler,
    renderer: Box<dyn TemplateRenderer>,
    bytes: Box<dyn ByteSource>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// Options are checked against the built-in capability registry; use
    /// [`with_checker`](Self::with_checker) to plug in another policy.
    pub fn new(
        catalog: Arc<dyn FeatureCatalog>,
        renderer: Box<dyn TemplateRenderer>,
        bytes: Box<dyn ByteSource>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            resolver: FeatureResolver::new(
                Arc::clone(&catalog),
                Arc::new(RegistryCompatibilityChecker),
            ),
            catalog,
            assembler: Assembler::new(),
            renderer,
            bytes,
            filesystem,
        }
    }

    pub fn with_checker(mut self, checker: Arc<dyn CompatibilityChecker>) -> Self {
        let max_passes = self.resolver.max_passes();
        self.resolver = FeatureResolver::new(Arc::clone(&self.catalog), checker)
            .with_max_passes(max_passes);
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.resolver = self.resolver.with_max_passes(max_passes);
        self
    }

    /// Resolve only, without assembling anything.
    pub fn resolve(&self, features: &[String], options: Options) -> ForgeResult<Resolution> {
        Ok(self.resolver.resolve(features, options)?)
    }

    /// Generate a project under `output_root/<project name>`.
    #[instrument(
        skip_all,
        fields(
            run_id = %Uuid::new_v4(),
            project = %request.project_name,
            output_root = %output_root.as_ref().display()
        )
    )]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        output_root: impl AsRef<Path>,
    ) -> ForgeResult<GenerationReport> {
        let (project, resolution_names, warnings, registry) = self.assemble(request)?;

        let model = RenderModel::for_project(&project, &request.options, &resolution_names);
        let root = output_root.as_ref().join(project.as_str());
        let structure = self.materialize(&registry, &model, root)?;

        self.write_structure(&structure)?;

        info!(files = structure.file_count(), "Project generated");
        Ok(GenerationReport {
            root: structure.root().clone(),
            features: resolution_names,
            warnings,
            files_written: structure.file_count(),
        })
    }

    /// Run the whole pipeline in memory.
    #[instrument(skip_all, fields(run_id = %Uuid::new_v4(), project = %request.project_name))]
    pub fn preview(&self, request: &GenerationRequest) -> ForgeResult<Preview> {
        let (project, features, warnings, registry) = self.assemble(request)?;
        let model = RenderModel::for_project(&project, &request.options, &features);

        let mut files = BTreeMap::new();
        for (name, entry) in registry.iter() {
            let (path, shown) = match &entry.artifact {
                Artifact::Rendered {
                    path,
                    template,
                    variables,
                    ..
                } => (
                    path,
                    self.renderer
                        .render(name, template.as_str(), &model.overlay(variables))?,
                ),
                Artifact::Binary { path, resource, .. } => {
                    let shown = match self.bytes.read(resource) {
                        Ok(bytes) => format!("<binary: {} bytes>", bytes.len()),
                        Err(e) => {
                            warn!(artifact = name, error = %e, "binary resource unavailable for preview");
                            format!("<binary: {resource} unavailable>")
                        }
                    };
                    (path, shown)
                }
            };
            files.insert(path.to_string(), shown);
        }

        Ok(Preview {
            project_name: project.to_string(),
            options: request.options,
            features,
            warnings,
            files,
        })
    }

    /// List catalog features.
    pub fn list_features(&self, filter: FeatureFilter) -> Vec<FeatureInfo> {
        self.catalog
            .features()
            .iter()
            .filter(|f| filter.include_hidden || f.is_visible())
            .filter(|f| filter.application_type.is_none_or(|t| f.supports(t)))
            .map(|f| FeatureInfo::from_feature(f.as_ref()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn assemble(
        &self,
        request: &GenerationRequest,
    ) -> ForgeResult<(ProjectName, Vec<String>, Vec<String>, ArtifactRegistry)> {
        let project = validator::validate_project_name(&request.project_name)?;

        let resolution = self.resolver.resolve(&request.features, request.options)?;
        for warning in &resolution.warnings {
            warn!(%warning, "feature warning");
        }

        let names = resolution.features.names();
        let registry =
            self.assembler
                .assemble(resolution.features, request.options, project.clone())?;

        Ok((project, names, resolution.warnings, registry))
    }

    fn materialize(
        &self,
        registry: &ArtifactRegistry,
        model: &RenderModel,
        root: PathBuf,
    ) -> ForgeResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(root);

        for (name, entry) in registry.iter() {
            match &entry.artifact {
                Artifact::Rendered {
                    path,
                    template,
                    variables,
                    executable,
                } => {
                    let text = self
                        .renderer
                        .render(name, template.as_str(), &model.overlay(variables))?;
                    structure.add_file(path.clone(), FileContent::Text(text), *executable);
                }
                Artifact::Binary {
                    path,
                    resource,
                    executable,
                } => {
                    let bytes = self.bytes.read(resource)?;
                    structure.add_file(path.clone(), FileContent::Bytes(bytes), *executable);
                }
            }
        }

        validator::validate_project_structure(&structure)?;
        Ok(structure)
    }

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure) -> ForgeResult<()> {
        if self.filesystem.exists(structure.root()) {
            return Err(ApplicationError::ProjectExists {
                path: structure.root().clone(),
            }
            .into());
        }

        match self.write_all(structure) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> ForgeResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for file in structure.files() {
            let path = root.join(file.path.to_path_buf());

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }

            self.filesystem.write_file(&path, file.content.as_bytes())?;

            if file.executable {
                self.filesystem.set_permissions(&path, true)?;
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
