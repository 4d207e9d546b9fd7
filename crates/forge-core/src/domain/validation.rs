use crate::domain::{
    entities::{Options, ProjectName, ProjectStructure},
    error::DomainError,
};

/// Checks the generation service runs before resolving and again before
/// anything touches the filesystem.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_options(options: &Options) -> Result<(), DomainError> {
        options.validate()
    }

    pub fn validate_project_name(name: &str) -> Result<ProjectName, DomainError> {
        ProjectName::new(name)
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
