//! Feature resolution.
//!
//! Turns requested feature names plus an option set into a consistent,
//! ordered feature list. Resolution is a bounded fixpoint:
//!
//! 1. every selected feature's `process_selected_features` hook runs against
//!    the selection as it stood at the start of the pass;
//! 2. the predicates registered during the pass are applied in one sweep;
//! 3. requests made by features that were just excluded are dropped, and
//!    implied features nobody requested any more leave the selection;
//! 4. the remaining implied features are appended.
//!
//! A pass that removes nothing, adds nothing and registers no predicate that
//! an earlier pass had not already registered ends resolution.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::{
    application::ports::{CompatibilityChecker, FeatureCatalog},
    domain::{DomainError, Feature, FeatureContext, FeaturePredicate, Options},
};

/// Passes allowed before resolution is declared non-convergent.
pub const DEFAULT_MAX_PASSES: usize = 16;

/// Features that survived resolution, in selection order.
///
/// Deliberately not `Clone`: the assembler consumes it.
pub struct ResolvedFeatures(Vec<Arc<dyn Feature>>);

impl ResolvedFeatures {
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|f| f.name().to_string()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|f| f.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Feature>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_inner(self) -> Vec<Arc<dyn Feature>> {
        self.0
    }
}

impl fmt::Debug for ResolvedFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(|x| x.name())).finish()
    }
}

/// Outcome of a successful resolution.
#[derive(Debug)]
pub struct Resolution {
    pub features: ResolvedFeatures,
    /// Exclusion notices and hook warnings. Never fatal.
    pub warnings: Vec<String>,
    /// Passes it took to converge.
    pub passes: usize,
}

pub struct FeatureResolver {
    catalog: Arc<dyn FeatureCatalog>,
    checker: Arc<dyn CompatibilityChecker>,
    max_passes: usize,
}

impl FeatureResolver {
    pub fn new(catalog: Arc<dyn FeatureCatalog>, checker: Arc<dyn CompatibilityChecker>) -> Self {
        Self {
            catalog,
            checker,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Override the pass bound. Values below one are raised to one.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    #[instrument(skip_all, fields(requested = requested.len(), options = %options))]
    pub fn resolve<S: AsRef<str>>(
        &self,
        requested: &[S],
        options: Options,
    ) -> Result<Resolution, DomainError> {
        self.checker.check(&options)?;

        // Every requested name must exist before any hook runs.
        let mut initial: Vec<Arc<dyn Feature>> = Vec::with_capacity(requested.len());
        for name in requested {
            let name = name.as_ref();
            if initial.iter().any(|f| f.name() == name) {
                debug!(feature = name, "duplicate request ignored");
                continue;
            }
            initial.push(self.lookup(name)?);
        }

        let explicit: HashSet<String> = initial.iter().map(|f| f.name().to_string()).collect();
        let mut context = FeatureContext::new(options, initial);
        let mut seen: HashSet<FeaturePredicate> = HashSet::new();

        for pass in 1..=self.max_passes {
            for feature in context.snapshot() {
                context.enter_hook(feature.name());
                feature.process_selected_features(&mut context);
            }
            context.leave_hook();

            let predicates = context.take_predicates();
            let mut requests = context.take_requests();

            let mut fresh_predicates = 0usize;
            for predicate in &predicates {
                if seen.insert(predicate.clone()) {
                    fresh_predicates += 1;
                }
            }

            let mut removed = context.apply_predicates(&predicates);

            // Implied features live only as long as something still asks for them.
            requests.retain(|r| r.requester.as_deref().is_none_or(|by| context.is_selected(by)));
            let orphaned = context.retain_selected(|name| {
                explicit.contains(name) || requests.iter().any(|r| r.name == name)
            });
            if !orphaned.is_empty() {
                debug!(pass, ?orphaned, "implied features no longer requested");
                requests.retain(|r| r.requester.as_deref().is_none_or(|by| context.is_selected(by)));
                removed.extend(orphaned);
            }

            let mut added = Vec::new();
            for request in requests {
                if context.is_selected(&request.name) {
                    continue;
                }
                context.push_selected(self.lookup(&request.name)?);
                added.push(request.name);
            }

            debug!(
                pass,
                ?removed,
                ?added,
                fresh_predicates,
                "resolution pass finished"
            );

            if removed.is_empty() && added.is_empty() && fresh_predicates == 0 {
                let (features, warnings) = context.into_parts();
                info!(
                    passes = pass,
                    features = features.len(),
                    warnings = warnings.len(),
                    "features resolved"
                );
                return Ok(Resolution {
                    features: ResolvedFeatures(features),
                    warnings,
                    passes: pass,
                });
            }
        }

        let remaining: Vec<String> = context.selected_names().map(str::to_string).collect();
        error!(
            max_passes = self.max_passes,
            remaining = %remaining.join(", "),
            "feature resolution did not converge"
        );
        Err(DomainError::ResolutionDidNotConverge {
            passes: self.max_passes,
            remaining,
        })
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Feature>, DomainError> {
        self.catalog
            .lookup(name)
            .ok_or_else(|| DomainError::UnknownFeature {
                name: name.to_string(),
            })
    }
}
