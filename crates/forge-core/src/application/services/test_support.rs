//! Synthetic features and catalogs for service tests.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    application::ports::FeatureCatalog,
    domain::{
        Artifact, DomainError, Feature, FeatureContext, GeneratorContext, RelativePath,
    },
};

type ResolveHook = Box<dyn Fn(&mut FeatureContext) + Send + Sync>;
type ApplyHook = Box<dyn Fn(&mut GeneratorContext) -> Result<(), DomainError> + Send + Sync>;

pub(crate) struct StubFeature {
    name: &'static str,
    visible: bool,
    on_resolve: ResolveHook,
    on_apply: ApplyHook,
    resolve_calls: AtomicUsize,
}

impl StubFeature {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            visible: true,
            on_resolve: Box::new(|_| {}),
            on_apply: Box::new(|_| Ok(())),
            resolve_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub(crate) fn on_resolve(
        mut self,
        hook: impl Fn(&mut FeatureContext) + Send + Sync + 'static,
    ) -> Self {
        self.on_resolve = Box::new(hook);
        self
    }

    pub(crate) fn on_apply(
        mut self,
        hook: impl Fn(&mut GeneratorContext) -> Result<(), DomainError> + Send + Sync + 'static,
    ) -> Self {
        self.on_apply = Box::new(hook);
        self
    }

    /// Register one rendered artifact named `artifact` at `path`.
    pub(crate) fn contributes(self, artifact: &'static str, path: &'static str) -> Self {
        self.on_apply(move |ctx| {
            ctx.add_artifact(artifact, Artifact::rendered(RelativePath::new(path), "{{PROJECT_NAME}}"))
        })
    }

    pub(crate) fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for StubFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubFeature").field("name", &self.name).finish()
    }
}

impl Feature for StubFeature {
    fn name(&self) -> &str {
        self.name
    }
    fn title(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "test feature"
    }
    fn is_visible(&self) -> bool {
        self.visible
    }
    fn process_selected_features(&self, context: &mut FeatureContext) {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        (self.on_resolve)(context);
    }
    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        (self.on_apply)(context)
    }
}

#[derive(Debug, Default)]
pub(crate) struct StubCatalog {
    features: Vec<Arc<dyn Feature>>,
}

impl StubCatalog {
    pub(crate) fn with(mut self, feature: impl Feature + 'static) -> Self {
        self.features.push(Arc::new(feature));
        self
    }

    pub(crate) fn with_arc(mut self, feature: Arc<dyn Feature>) -> Self {
        self.features.push(feature);
        self
    }
}

impl FeatureCatalog for StubCatalog {
    fn lookup(&self, name: &str) -> Option<Arc<dyn Feature>> {
        self.features.iter().find(|f| f.name() == name).cloned()
    }

    fn features(&self) -> Vec<Arc<dyn Feature>> {
        self.features.clone()
    }
}
