//! Resolution-scoped working state.
//!
//! Hooks see the context through an append-only surface: they can read the
//! options and the current selection, register exclusions, add warnings and
//! request implied features. The selection itself only changes between
//! passes, when the resolver applies what the hooks registered.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{
    feature::Feature, options::Options, predicate::FeaturePredicate,
};

/// Where a warning came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WarningSource {
    /// Added directly by the named feature's hook.
    Hook(String),
    /// Raised when a predicate removed a feature.
    Exclusion,
    /// Added outside any hook.
    Detached,
}

/// An implied-feature request and the feature whose hook made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FeatureRequest {
    pub requester: Option<String>,
    pub name: String,
}

#[derive(Debug)]
pub struct FeatureContext {
    options: Options,
    selected: Vec<Arc<dyn Feature>>,
    predicates: Vec<FeaturePredicate>,
    requested: Vec<FeatureRequest>,
    /// Feature whose hook is running, if any.
    current: Option<String>,
    /// Warnings in the order they were raised.
    warnings: Vec<(WarningSource, String)>,
}

impl FeatureContext {
    pub(crate) fn new(options: Options, selected: Vec<Arc<dyn Feature>>) -> Self {
        Self {
            options,
            selected,
            predicates: Vec::new(),
            requested: Vec::new(),
            current: None,
            warnings: Vec::new(),
        }
    }

    // ── Hook surface ─────────────────────────────────────────────────────────

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether `name` was selected at the start of the current pass.
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|f| f.name() == name)
    }

    pub fn selected_names(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(|f| f.name())
    }

    /// Register an exclusion. It takes effect at the end of the pass.
    pub fn exclude(&mut self, predicate: FeaturePredicate) {
        self.predicates.push(predicate);
    }

    /// Add a warning on behalf of the running hook.
    ///
    /// Hooks re-run every pass, so only the warnings from a feature's most
    /// recent run are kept. Warnings of a feature that was later excluded
    /// survive.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let source = match &self.current {
            Some(name) => WarningSource::Hook(name.clone()),
            None => WarningSource::Detached,
        };
        self.warnings.push((source, warning.into()));
    }

    /// Ask for another feature to be selected. Added at the end of the pass,
    /// unless the requesting feature is excluded in that same pass.
    pub fn request_feature(&mut self, name: impl Into<String>) {
        self.requested.push(FeatureRequest {
            requester: self.current.clone(),
            name: name.into(),
        });
    }

    /// Every warning collected so far, in the order it was raised.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(|(_, w)| w.as_str())
    }

    // ── Resolver surface ─────────────────────────────────────────────────────

    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn Feature>> {
        self.selected.clone()
    }

    /// Mark `name`'s hook as running and forget what its previous run said.
    pub(crate) fn enter_hook(&mut self, name: &str) {
        self.warnings
            .retain(|(source, _)| !matches!(source, WarningSource::Hook(n) if n == name));
        self.current = Some(name.to_string());
    }

    pub(crate) fn leave_hook(&mut self) {
        self.current = None;
    }

    pub(crate) fn take_predicates(&mut self) -> Vec<FeaturePredicate> {
        std::mem::take(&mut self.predicates)
    }

    pub(crate) fn take_requests(&mut self) -> Vec<FeatureRequest> {
        std::mem::take(&mut self.requested)
    }

    /// Remove every selected feature matched by a predicate.
    ///
    /// Each removed feature reports one warning. When several matching
    /// predicates carry one, the lexicographically lowest wins, and the
    /// warnings of one sweep are recorded by removed feature name, so hook
    /// order never shows in the result. Returns the removed names in
    /// selection order.
    pub(crate) fn apply_predicates(&mut self, predicates: &[FeaturePredicate]) -> Vec<String> {
        let mut removed = Vec::new();
        let mut warnings: BTreeMap<String, String> = BTreeMap::new();

        self.selected.retain(|feature| {
            let mut matching = predicates.iter().filter(|p| p.test(feature.as_ref())).peekable();
            if matching.peek().is_none() {
                return true;
            }
            if let Some(warning) = matching.filter_map(FeaturePredicate::warning).min() {
                warnings.insert(feature.name().to_string(), warning.to_string());
            }
            removed.push(feature.name().to_string());
            false
        });

        self.warnings.extend(
            warnings
                .into_values()
                .map(|warning| (WarningSource::Exclusion, warning)),
        );
        removed
    }

    /// Keep only the selected features `keep` accepts. Returns the dropped
    /// names in selection order.
    pub(crate) fn retain_selected(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut dropped = Vec::new();
        self.selected.retain(|feature| {
            let kept = keep(feature.name());
            if !kept {
                dropped.push(feature.name().to_string());
            }
            kept
        });
        dropped
    }

    pub(crate) fn push_selected(&mut self, feature: Arc<dyn Feature>) {
        self.selected.push(feature);
    }

    pub(crate) fn into_parts(self) -> (Vec<Arc<dyn Feature>>, Vec<String>) {
        let warnings = self.warnings.into_iter().map(|(_, w)| w).collect();
        (self.selected, warnings)
    }
}
