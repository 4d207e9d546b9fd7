//! Features that ship with Forge.
//!
//! Every feature here is stateless and registered once per process by
//! [`InMemoryCatalog::with_builtin`](crate::InMemoryCatalog::with_builtin).
//! Data-driven features live in `feature.toml` manifests instead, see
//! [`ManifestFeatureLoader`](crate::ManifestFeatureLoader).

use std::sync::Arc;

use forge_core::domain::Feature;

mod database;
mod gradle_wrapper;
mod messaging;
mod reloading;
mod web;

pub use database::H2;
pub use gradle_wrapper::GradleWrapper;
pub use messaging::{Jackson, RabbitMq};
pub use reloading::{JRebel, SpringLoaded};
pub use web::Web;

/// All built-in features, in listing order.
pub fn builtin_features() -> Vec<Arc<dyn Feature>> {
    vec![
        Arc::new(Web),
        Arc::new(GradleWrapper),
        Arc::new(H2),
        Arc::new(RabbitMq),
        Arc::new(Jackson),
        Arc::new(JRebel),
        Arc::new(SpringLoaded),
    ]
}

/// Build script dependency line contributed by a built-in feature, if any.
pub(crate) fn dependency_line(feature: &str) -> Option<&'static str> {
    match feature {
        "h2" => Some("runtimeOnly \"com.h2database:h2\""),
        "rabbitmq" => Some("implementation \"com.rabbitmq:amqp-client:5.20.0\""),
        "jackson" => Some("implementation \"com.fasterxml.jackson.core:jackson-databind:2.17.0\""),
        _ => None,
    }
}
