//! Command handlers, one module per subcommand.
//!
//! Shared plumbing for turning flags plus configuration into core inputs
//! lives here.

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
pub mod list;
pub mod preview;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};

use forge_adapters::{
    DirectoryByteSource, InMemoryCatalog, LocalFilesystem, ManifestFeatureLoader,
    MemoryByteSource, SimpleRenderer,
};
use forge_core::{
    application::{ByteSource, GenerationService},
    domain::{
        ApplicationType, BuildTool, GormImpl, JdkVersion, Language, Options, TestFramework,
    },
};

use crate::{
    cli::{GenerationArgs, GormArg},
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Build the option set: explicit flag, then `[defaults]`, then whatever the
/// application type implies.
pub fn build_options(args: &GenerationArgs, config: &AppConfig) -> CliResult<Options> {
    let defaults = &config.defaults;

    let application_type = match args.application_type {
        Some(t) => t.into(),
        None => configured::<ApplicationType>(
            "defaults.application_type",
            &defaults.application_type,
        )?,
    };
    let mut builder = Options::builder().application_type(application_type);

    if let Some(build) = args
        .build_tool
        .map(BuildTool::from)
        .map(Ok)
        .or_else(|| optional::<BuildTool>("defaults.build_tool", &defaults.build_tool))
        .transpose()?
    {
        builder = builder.build_tool(build);
    }

    if let Some(test) = args
        .test_framework
        .map(TestFramework::from)
        .map(Ok)
        .or_else(|| optional::<TestFramework>("defaults.test_framework", &defaults.test_framework))
        .transpose()?
    {
        builder = builder.test_framework(test);
    }

    if let Some(jdk) = args
        .jdk
        .map(JdkVersion::from)
        .map(Ok)
        .or_else(|| optional::<JdkVersion>("defaults.jdk", &defaults.jdk))
        .transpose()?
    {
        builder = builder.jdk(jdk);
    }

    if let Some(language) = args
        .language
        .map(Language::from)
        .map(Ok)
        .or_else(|| optional::<Language>("defaults.language", &defaults.language))
        .transpose()?
    {
        builder = builder.language(language);
    }

    match args.gorm {
        Some(GormArg::None) => builder = builder.without_gorm(),
        Some(gorm) => {
            if let Some(gorm) = gorm.to_core() {
                builder = builder.gorm(gorm);
            }
        }
        None => match defaults.gorm.as_deref().map(str::trim) {
            None | Some("") => {}
            Some(value) if value.eq_ignore_ascii_case("none") => builder = builder.without_gorm(),
            Some(value) => builder = builder.gorm(configured::<GormImpl>("defaults.gorm", value)?),
        },
    }

    let options = builder.build();
    debug!(%options, "options resolved");
    Ok(options)
}

/// Features from `[defaults]` followed by `--features`, in that order.
/// Duplicates are left for the resolver to collapse.
pub fn requested_features(args: &GenerationArgs, config: &AppConfig) -> Vec<String> {
    config
        .defaults
        .features
        .iter()
        .chain(args.features.iter())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Wire the generation service with the built-in catalog plus any manifest
/// features, reading binaries from the resource directory if one is set.
pub fn build_service(
    features_dir: Option<&PathBuf>,
    resources_dir: Option<&PathBuf>,
    config: &AppConfig,
) -> CliResult<GenerationService> {
    let catalog = load_catalog(features_dir, config)?;

    let bytes: Box<dyn ByteSource> = match resources_dir.or(config.resources.dir.as_ref()) {
        Some(dir) => {
            debug!(dir = %dir.display(), "reading binary resources from directory");
            Box::new(DirectoryByteSource::new(dir))
        }
        None => Box::new(MemoryByteSource::new()),
    };

    Ok(GenerationService::new(
        Arc::new(catalog),
        Box::new(SimpleRenderer::new()),
        bytes,
        Box::new(LocalFilesystem::new()),
    ))
}

/// Built-in features plus manifests from `--features-dir` or `features.dir`.
pub fn load_catalog(features_dir: Option<&PathBuf>, config: &AppConfig) -> CliResult<InMemoryCatalog> {
    let catalog = InMemoryCatalog::with_builtin()?;

    if let Some(dir) = features_dir.or(config.features.dir.as_ref()) {
        let loaded = ManifestFeatureLoader::new(dir)
            .load_all()
            .map_err(|e| CliError::InvalidInput {
                message: format!("cannot load features from {}", dir.display()),
                source: Some(Box::new(e)),
            })?;
        info!(count = loaded.len(), dir = %dir.display(), "manifest features loaded");
        catalog.extend(loaded)?;
    }

    Ok(catalog)
}

fn configured<T>(key: &str, value: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse::<T>().map_err(|e| CliError::ConfigError {
        message: format!("invalid value for {key}: '{value}'"),
        source: Some(Box::new(e)),
    })
}

fn optional<T>(key: &str, value: &Option<String>) -> Option<CliResult<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| configured(key, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{AppTypeArg, JdkArg};

    fn args(name: &str) -> GenerationArgs {
        GenerationArgs {
            name: name.into(),
            application_type: None,
            build_tool: None,
            test_framework: None,
            gorm: None,
            jdk: None,
            language: None,
            features: Vec::new(),
            features_dir: None,
            resources: None,
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let options = build_options(&args("demo"), &AppConfig::default()).unwrap();
        assert_eq!(options.application_type(), ApplicationType::Web);
        assert_eq!(options.jdk(), JdkVersion::Jdk17);
    }

    #[test]
    fn flags_beat_config() {
        let mut config = AppConfig::default();
        config.defaults.jdk = Some("21".into());
        let mut args = args("demo");
        args.jdk = Some(JdkArg::Jdk11);
        args.application_type = Some(AppTypeArg::RestApi);

        let options = build_options(&args, &config).unwrap();
        assert_eq!(options.jdk(), JdkVersion::Jdk11);
        assert_eq!(options.application_type(), ApplicationType::RestApi);
    }

    #[test]
    fn config_gorm_none_disables_gorm() {
        let mut config = AppConfig::default();
        config.defaults.gorm = Some("none".into());
        let options = build_options(&args("demo"), &config).unwrap();
        assert_eq!(options.gorm(), None);

        config.defaults.gorm = Some("mongo".into());
        let options = build_options(&args("demo"), &config).unwrap();
        assert_eq!(options.gorm(), Some(GormImpl::Mongodb));
    }

    #[test]
    fn flag_gorm_none_disables_gorm() {
        let mut args = args("demo");
        args.gorm = Some(GormArg::None);
        let options = build_options(&args, &AppConfig::default()).unwrap();
        assert_eq!(options.gorm(), None);
    }

    #[test]
    fn bad_config_value_is_a_config_error() {
        let mut config = AppConfig::default();
        config.defaults.jdk = Some("9".into());
        let err = build_options(&args("demo"), &config).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn requested_features_put_defaults_first() {
        let mut args = args("demo");
        args.features = vec!["springloaded".into(), " ".into()];
        assert_eq!(
            requested_features(&args, &AppConfig::default()),
            vec!["web", "springloaded"]
        );
    }

    #[test]
    fn missing_features_dir_is_invalid_input() {
        let dir = PathBuf::from("/no/such/forge/features");
        let err = load_catalog(Some(&dir), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }
}
