use forge_core::domain::{
    ApplicationType, Artifact, DomainError, Feature, FeatureCategory, FeatureContext,
    GeneratorContext, RelativePath,
};

const RABBITMQ_YML: &str = r#"rabbitmq:
    uri: amqp://localhost:5672
    virtualHost: /
    connection:
        name: {{PROJECT_NAME_KEBAB}}
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct RabbitMq;

impl RabbitMq {
    pub const NAME: &'static str = "rabbitmq";
}

impl Feature for RabbitMq {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        "RabbitMQ Messaging"
    }

    fn description(&self) -> &str {
        "Adds the RabbitMQ AMQP client with JSON message conversion"
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::Messaging
    }

    fn supports(&self, application_type: ApplicationType) -> bool {
        matches!(application_type, ApplicationType::Web | ApplicationType::RestApi)
    }

    fn process_selected_features(&self, context: &mut FeatureContext) {
        context.request_feature(Jackson::NAME);
    }

    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        context.add_artifact(
            "rabbitmqConfig",
            Artifact::rendered(
                RelativePath::try_new("grails-app/conf/rabbitmq.yml")?,
                RABBITMQ_YML,
            ),
        )
    }
}

/// JSON binding support. Pulled in by features that exchange JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jackson;

impl Jackson {
    pub const NAME: &'static str = "jackson";
}

impl Feature for Jackson {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        "Jackson Databind"
    }

    fn description(&self) -> &str {
        "Adds Jackson for JSON serialization"
    }

    fn is_visible(&self) -> bool {
        false
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::Serialization
    }

    // Contributes only a build dependency.
    fn apply(&self, _context: &mut GeneratorContext) -> Result<(), DomainError> {
        Ok(())
    }
}
