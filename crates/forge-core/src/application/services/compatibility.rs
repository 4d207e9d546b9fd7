use tracing::debug;

use crate::{
    application::ports::CompatibilityChecker,
    domain::{DomainError, DomainValidator, Options},
};

/// Default checker backed by the static capability registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryCompatibilityChecker;

impl CompatibilityChecker for RegistryCompatibilityChecker {
    fn check(&self, options: &Options) -> Result<(), DomainError> {
        let result = DomainValidator::validate_options(options);
        if let Err(e) = &result {
            debug!(options = %options, error = %e, "option combination rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationType, GormImpl, Language};

    #[test]
    fn accepts_defaults() {
        assert!(RegistryCompatibilityChecker.check(&Options::default()).is_ok());
    }

    #[test]
    fn rejects_gorm_on_plain_plugin() {
        let options = Options::builder()
            .application_type(ApplicationType::Plugin)
            .gorm(GormImpl::Neo4j)
            .build();
        assert!(matches!(
            RegistryCompatibilityChecker.check(&options),
            Err(DomainError::IncompatibleOptions { .. })
        ));
    }

    #[test]
    fn rejects_kotlin_for_web_plugin() {
        let options = Options::builder()
            .application_type(ApplicationType::WebPlugin)
            .language(Language::Kotlin)
            .build();
        assert!(RegistryCompatibilityChecker.check(&options).is_err());
    }
}
