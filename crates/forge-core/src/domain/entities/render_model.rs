use std::collections::BTreeMap;

use crate::domain::entities::{common::ProjectName, options::Options};

/// Variables available to every rendered artifact of a run.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | "demoApp" |
/// | `PROJECT_NAME_SNAKE` | "demo_app" |
/// | `PROJECT_NAME_KEBAB` | "demo-app" |
/// | `PROJECT_NAME_PASCAL` | "DemoApp" |
/// | `PACKAGE_NAME` | "demoapp" |
/// | `APPLICATION_TYPE` | "web" |
/// | `BUILD_TOOL` | "gradle" |
/// | `TEST_FRAMEWORK` | "spock" |
/// | `GORM` | "hibernate" (empty when none) |
/// | `JDK_VERSION` | "17" |
/// | `LANGUAGE` | "groovy" |
/// | `FEATURES` | "web,jackson" |
///
/// `YEAR` is left to the renderer, which knows the clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderModel {
    variables: BTreeMap<String, String>,
}

impl RenderModel {
    pub fn for_project(project: &ProjectName, options: &Options, features: &[String]) -> Self {
        let name = project.as_str();
        let mut vars = BTreeMap::new();

        vars.insert("PROJECT_NAME".to_string(), name.to_string());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(name));
        vars.insert("PROJECT_NAME_KEBAB".to_string(), to_kebab_case(name));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(name));
        vars.insert("PACKAGE_NAME".to_string(), project.package_name());

        vars.insert(
            "APPLICATION_TYPE".to_string(),
            options.application_type().to_string(),
        );
        vars.insert("BUILD_TOOL".to_string(), options.build_tool().to_string());
        vars.insert(
            "TEST_FRAMEWORK".to_string(),
            options.test_framework().to_string(),
        );
        vars.insert(
            "GORM".to_string(),
            options.gorm().map(|g| g.to_string()).unwrap_or_default(),
        );
        vars.insert("JDK_VERSION".to_string(), options.jdk().to_string());
        vars.insert("LANGUAGE".to_string(), options.language().to_string());
        vars.insert("FEATURES".to_string(), features.join(","));

        Self { variables: vars }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Layer artifact-local variables over this model. Local values win.
    pub fn overlay(&self, local: &BTreeMap<String, String>) -> Self {
        let mut variables = self.variables.clone();
        variables.extend(local.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ── Case conversion ──────────────────────────────────────────────────────────

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split on `_`, `-`, `.`, whitespace, camelCase humps and acronym ends.
///
/// "HTTPServer" splits into "http" and "server".
pub(crate) fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            let camel_hump = c.is_lowercase() && next.is_uppercase();
            let acronym_end = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase());

            if camel_hump || acronym_end {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
