//! Implementation of the `forge list` command.

use forge_core::{application::FeatureFilter, domain::FeatureInfo};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::build_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = build_service(args.features_dir.as_ref(), None, &config)?;
    let features = service.list_features(FeatureFilter {
        application_type: args.application_type.map(Into::into),
        include_hidden: args.all,
    });

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Features:")?;
            for line in table(&features) {
                output.print(&line)?;
            }
            if !args.all {
                output.print("")?;
                output.info("Use --all to include hidden features")?;
            }
        }
        ListFormat::Json => {
            // JSON goes out even in quiet mode so pipes stay parseable.
            let json = serde_json::to_string_pretty(&features).map_err(|e| CliError::IoError {
                message: "failed to serialise feature list".into(),
                source: e.into(),
            })?;
            output.data(&json)?;
        }
        ListFormat::List => {
            for f in &features {
                output.data(&f.name)?;
            }
        }
        ListFormat::Csv => {
            output.data("name,category,visible,description")?;
            for f in &features {
                output.data(&format!(
                    "{},{},{},{}",
                    f.name,
                    f.category,
                    f.visible,
                    csv_field(&f.description)
                ))?;
            }
        }
    }

    Ok(())
}

fn table(features: &[FeatureInfo]) -> Vec<String> {
    let width = features.iter().map(|f| f.name.len()).max().unwrap_or(0);
    features
        .iter()
        .map(|f| {
            let hidden = if f.visible { "" } else { " (hidden)" };
            format!(
                "  {:<width$}  [{}] {}{hidden}",
                f.name, f.category, f.description
            )
        })
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::domain::FeatureCategory;

    fn info(name: &str, visible: bool) -> FeatureInfo {
        FeatureInfo {
            name: name.into(),
            title: name.into(),
            description: format!("{name} support"),
            category: FeatureCategory::DevTools,
            visible,
            documentation: None,
        }
    }

    #[test]
    fn table_aligns_names_and_marks_hidden() {
        let lines = table(&[info("jrebel", true), info("springloaded", false)]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  jrebel        ["));
        assert!(lines[1].ends_with("(hidden)"));
    }

    #[test]
    fn csv_quotes_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
