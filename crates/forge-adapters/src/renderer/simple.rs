//! Simple variable substitution renderer.

use chrono::Datelike;
use forge_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderModel,
    error::ForgeResult,
};
use tracing::instrument;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Renderer replacing `{{KEY}}` placeholders with model values.
///
/// Whitespace inside the braces is ignored. A placeholder naming a key the
/// model does not hold, or one that is never closed, fails the artifact.
/// `YEAR` is filled from the local clock unless the model already sets it.
#[derive(Debug, Clone, Default)]
pub struct SimpleRenderer {
    year: Option<i32>,
}

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `YEAR` instead of reading the clock.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    fn year(&self) -> String {
        self.year
            .unwrap_or_else(|| chrono::Local::now().year())
            .to_string()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip(self, template, model))]
    fn render(&self, artifact: &str, template: &str, model: &RenderModel) -> ForgeResult<String> {
        let year = self.year();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];

            let end = after.find(CLOSE).ok_or_else(|| ApplicationError::RenderingFailed {
                artifact: artifact.to_string(),
                reason: format!("unclosed placeholder at byte {}", template.len() - rest.len() + start),
            })?;

            let key = after[..end].trim();
            let value = match model.get(key) {
                Some(value) => value,
                None if key == "YEAR" => year.as_str(),
                None => {
                    return Err(ApplicationError::RenderingFailed {
                        artifact: artifact.to_string(),
                        reason: format!("unknown placeholder '{key}'"),
                    }
                    .into());
                }
            };
            out.push_str(value);
            rest = &after[end + CLOSE.len()..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::domain::{ApplicationType, JdkVersion, Options, ProjectName};

    fn model() -> RenderModel {
        let options = Options::builder()
            .application_type(ApplicationType::Web)
            .jdk(JdkVersion::Jdk11)
            .build();
        RenderModel::for_project(
            &ProjectName::new("my-app").unwrap(),
            &options,
            &["web".to_string()],
        )
    }

    #[test]
    fn substitutes_known_keys() {
        let out = SimpleRenderer::new()
            .render("readme", "# {{ PROJECT_NAME }} on JDK {{JDK_VERSION}}", &model())
            .unwrap();
        assert_eq!(out, "# my-app on JDK 11");
    }

    #[test]
    fn year_comes_from_renderer_unless_model_sets_it() {
        let renderer = SimpleRenderer::new().with_year(2031);
        assert_eq!(renderer.render("license", "(c) {{YEAR}}", &model()).unwrap(), "(c) 2031");

        let pinned = model().with_variable("YEAR", "1999");
        assert_eq!(renderer.render("license", "(c) {{YEAR}}", &pinned).unwrap(), "(c) 1999");
    }

    #[test]
    fn unknown_placeholder_fails() {
        let err = SimpleRenderer::new()
            .render("buildGradle", "{{NOPE}}", &model())
            .unwrap_err();
        assert!(err.to_string().contains("buildGradle"));
        assert!(err.to_string().contains("NOPE"));
    }

    #[test]
    fn unclosed_placeholder_fails() {
        assert!(SimpleRenderer::new()
            .render("x", "hello {{PROJECT_NAME", &model())
            .is_err());
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let text = "plugins { id 'groovy' }\n${dollar} stays";
        assert_eq!(SimpleRenderer::new().render("x", text, &model()).unwrap(), text);
    }
}
