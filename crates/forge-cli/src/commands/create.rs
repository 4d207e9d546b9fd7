//! Implementation of the `forge create` command.
//!
//! Responsibility: translate CLI arguments into a `GenerationRequest`, show
//! what the resolver decided, and hand off to the core generation service.
//! No resolution logic lives here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, instrument};

use forge_core::{
    application::{GenerationRequest, GenerationService, Resolution},
    domain::{Options, ProjectName},
};

use crate::{
    cli::{CreateArgs, GlobalArgs},
    commands::{build_options, build_service, requested_features},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Asks the user before anything is written.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    fn confirm(&self, prompt: &str) -> CliResult<bool>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter;

#[cfg(feature = "interactive")]
impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str) -> CliResult<bool> {
        use dialoguer::{Confirm, theme::ColorfulTheme};
        use std::io::IsTerminal as _;

        if !std::io::stdin().is_terminal() {
            return Err(CliError::invalid_input(
                "cannot ask for confirmation without a terminal; pass --yes",
            ));
        }

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| CliError::IoError {
                message: "failed to read confirmation input".into(),
                source: std::io::Error::other(e),
            })
    }
}

#[cfg(not(feature = "interactive"))]
impl Prompter for TerminalPrompter {
    fn confirm(&self, _prompt: &str) -> CliResult<bool> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

/// Execute the `forge create` command.
///
/// 1. Build options and the requested feature list
/// 2. Resolve, and show the outcome with any warnings
/// 3. Refuse an existing target directory
/// 4. Early-exit on `--dry-run` with the file list
/// 5. Confirm unless `--yes`, `--quiet` or JSON output
/// 6. Generate and report
#[instrument(skip_all, fields(project = %args.generation.name))]
pub fn execute(
    args: CreateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = build_service(
        args.generation.features_dir.as_ref(),
        args.generation.resources.as_ref(),
        &config,
    )?;
    run(&args, &config, &output, &service, &TerminalPrompter)
}

fn run(
    args: &CreateArgs,
    config: &AppConfig,
    output: &OutputManager,
    service: &GenerationService,
    prompter: &dyn Prompter,
) -> CliResult<()> {
    let project =
        ProjectName::new(args.generation.name.as_str()).map_err(|e| CliError::Core(e.into()))?;
    let options = build_options(&args.generation, config)?;
    let request = GenerationRequest::new(project.as_str(), options)
        .with_features(requested_features(&args.generation, config));

    let resolution = service.resolve(&request.features, options)?;
    debug!(features = ?resolution.features.names(), passes = resolution.passes, "resolved");

    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let project_path = output_dir.join(project.as_str());

    if !output.is_json() {
        show_configuration(&project, &options, &resolution, &output_dir, output)?;
    }

    if project_path.exists() {
        return Err(CliError::ProjectExists { path: project_path });
    }

    if args.dry_run {
        return dry_run(service, &request, &project_path, output);
    }

    if !(args.yes || output.is_quiet() || output.is_json()) {
        let prompt = format!("Create '{project}' in {}?", output_dir.display());
        if !prompter.confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    info!(project = %project, path = %project_path.display(), "generation started");

    let spinner = spinner(output, &format!("Creating '{project}'..."));
    let result = service.generate(&request, &output_dir);
    spinner.finish_and_clear();
    let report = result?;

    info!(project = %project, files = report.files_written, "generation completed");

    if output.is_json() {
        let payload = serde_json::json!({
            "project": project.as_str(),
            "root": report.root.display().to_string(),
            "features": report.features,
            "warnings": report.warnings,
            "files_written": report.files_written,
            "created_at": chrono::Utc::now().to_rfc3339(),
        });
        output.data(&to_pretty_json(&payload)?)?;
        return Ok(());
    }

    output.success(&format!(
        "Application '{project}' created ({} files)",
        report.files_written
    ))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", report.root.display()))?;
    let gradle = if report.features.iter().any(|f| f == "gradle-wrapper") {
        "./gradlew"
    } else {
        "gradle"
    };
    output.print(&format!("  {gradle} bootRun"))?;

    Ok(())
}

fn dry_run(
    service: &GenerationService,
    request: &GenerationRequest,
    project_path: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let preview = service.preview(request)?;

    if output.is_json() {
        output.data(&to_pretty_json(&preview)?)?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create {} files at {}",
        preview.files.len(),
        project_path.display(),
    ))?;
    for path in preview.files.keys() {
        output.print(&format!("  {path}"))?;
    }
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    project: &ProjectName,
    options: &Options,
    resolution: &Resolution,
    output_dir: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Application:  {project}"))?;
    out.print(&format!("  Type:         {}", options.application_type()))?;
    out.print(&format!("  Language:     {}", options.language()))?;
    out.print(&format!("  Build:        {}", options.build_tool()))?;
    out.print(&format!("  Tests:        {}", options.test_framework()))?;
    out.print(&format!(
        "  GORM:         {}",
        options
            .gorm()
            .map(|g| g.to_string())
            .unwrap_or_else(|| "none".into())
    ))?;
    out.print(&format!("  JDK:          {}", options.jdk()))?;
    out.print(&format!(
        "  Features:     {}",
        resolution.features.names().join(", ")
    ))?;
    out.print(&format!("  Location:     {}", output_dir.display()))?;
    out.print("")?;

    for warning in &resolution.warnings {
        out.warning(warning)?;
    }
    Ok(())
}

fn spinner(output: &OutputManager, message: &str) -> ProgressBar {
    if output.is_quiet() || !output.supports_color() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::IoError {
        message: "failed to serialise output".into(),
        source: e.into(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GenerationArgs, JdkArg, OutputFormat};
    use tempfile::TempDir;

    fn create_args(name: &str, output: &Path) -> CreateArgs {
        CreateArgs {
            generation: GenerationArgs {
                name: name.into(),
                application_type: None,
                build_tool: None,
                test_framework: None,
                gorm: None,
                jdk: Some(JdkArg::Jdk17),
                language: None,
                features: Vec::new(),
                features_dir: None,
                resources: None,
            },
            output: Some(output.to_path_buf()),
            yes: false,
            dry_run: false,
        }
    }

    fn plain_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn service() -> GenerationService {
        build_service(None, None, &AppConfig::default()).unwrap()
    }

    #[test]
    fn declined_prompt_cancels_without_writing() {
        let temp = TempDir::new().unwrap();
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().times(1).returning(|_| Ok(false));

        let err = run(
            &create_args("demo", temp.path()),
            &AppConfig::default(),
            &plain_output(),
            &service(),
            &prompter,
        )
        .unwrap_err();

        assert!(matches!(err, CliError::Cancelled));
        assert!(!temp.path().join("demo").exists());
    }

    #[test]
    fn accepted_prompt_generates() {
        let temp = TempDir::new().unwrap();
        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .withf(|prompt| prompt.contains("demo"))
            .times(1)
            .returning(|_| Ok(true));

        run(
            &create_args("demo", temp.path()),
            &AppConfig::default(),
            &plain_output(),
            &service(),
            &prompter,
        )
        .unwrap();

        assert!(temp.path().join("demo/build.gradle").is_file());
    }

    #[test]
    fn yes_skips_the_prompt() {
        let temp = TempDir::new().unwrap();
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();

        let mut args = create_args("demo", temp.path());
        args.yes = true;
        run(&args, &AppConfig::default(), &plain_output(), &service(), &prompter).unwrap();

        assert!(temp.path().join("demo/settings.gradle").is_file());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();

        let mut args = create_args("demo", temp.path());
        args.dry_run = true;
        run(&args, &AppConfig::default(), &plain_output(), &service(), &prompter).unwrap();

        assert!(!temp.path().join("demo").exists());
    }

    #[test]
    fn existing_directory_is_refused() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("demo")).unwrap();
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();

        let err = run(
            &create_args("demo", temp.path()),
            &AppConfig::default(),
            &plain_output(),
            &service(),
            &prompter,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::ProjectExists { .. }));
    }

    #[test]
    fn invalid_name_fails_before_resolution() {
        let temp = TempDir::new().unwrap();
        let prompter = MockPrompter::new();
        let err = run(
            &create_args("../escape", temp.path()),
            &AppConfig::default(),
            &plain_output(),
            &service(),
            &prompter,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
