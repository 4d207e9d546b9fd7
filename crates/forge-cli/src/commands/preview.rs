//! Implementation of the `forge preview` command.

use tracing::instrument;

use forge_core::application::{GenerationRequest, Preview};

use crate::{
    cli::{GlobalArgs, PreviewArgs, PreviewFormat},
    commands::{build_options, build_service, requested_features},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Render the whole application in memory and print it.
#[instrument(skip_all, fields(project = %args.generation.name))]
pub fn execute(
    args: PreviewArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = build_service(
        args.generation.features_dir.as_ref(),
        args.generation.resources.as_ref(),
        &config,
    )?;

    let options = build_options(&args.generation, &config)?;
    let request = GenerationRequest::new(args.generation.name.as_str(), options)
        .with_features(requested_features(&args.generation, &config));
    let preview = service.preview(&request)?;

    if args.format == PreviewFormat::Json || output.is_json() {
        let json = serde_json::to_string_pretty(&preview).map_err(|e| CliError::IoError {
            message: "failed to serialise preview".into(),
            source: e.into(),
        })?;
        output.data(&json)?;
        return Ok(());
    }

    for warning in &preview.warnings {
        output.warning(warning)?;
    }
    output.data(&render_text(&preview))?;
    Ok(())
}

/// Each file under a `==> path <==` banner, in path order.
fn render_text(preview: &Preview) -> String {
    let mut out = format!(
        "# {} [{}]\n# features: {}\n",
        preview.project_name,
        preview.options,
        preview.features.join(", ")
    );
    for (path, content) in &preview.files {
        out.push_str(&format!("\n==> {path} <==\n"));
        out.push_str(content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
