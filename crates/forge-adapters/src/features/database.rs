use forge_core::domain::{
    Artifact, DomainError, Feature, FeatureCategory, FeatureContext, FeaturePredicate,
    GeneratorContext, RelativePath,
};

const DATASOURCE_YML: &str = r#"dataSource:
    pooled: true
    jmxExport: true
    driverClassName: org.h2.Driver
    username: sa
    password: ''
environments:
    development:
        dataSource:
            dbCreate: create-drop
            url: jdbc:h2:mem:{{PROJECT_NAME_SNAKE}}_dev;LOCK_TIMEOUT=10000;DB_CLOSE_ON_EXIT=FALSE
    test:
        dataSource:
            dbCreate: update
            url: jdbc:h2:mem:{{PROJECT_NAME_SNAKE}}_test;LOCK_TIMEOUT=10000;DB_CLOSE_ON_EXIT=FALSE
"#;

/// In-memory H2 database driver. Only meaningful for relational GORM.
#[derive(Debug, Clone, Copy, Default)]
pub struct H2;

impl H2 {
    pub const NAME: &'static str = "h2";
}

impl Feature for H2 {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        "H2 Database"
    }

    fn description(&self) -> &str {
        "Adds the H2 driver and an in-memory development data source"
    }

    fn documentation(&self) -> Option<&str> {
        Some("https://www.h2database.com/html/main.html")
    }

    fn category(&self) -> FeatureCategory {
        FeatureCategory::Database
    }

    fn process_selected_features(&self, context: &mut FeatureContext) {
        if let Some(gorm) = context.options().gorm().filter(|g| !g.is_relational()) {
            context.exclude(FeaturePredicate::excluding(Self::NAME).with_warning(format!(
                "h2 was excluded because GORM {gorm} does not use a relational database"
            )));
        }
    }

    fn apply(&self, context: &mut GeneratorContext) -> Result<(), DomainError> {
        context.add_artifact(
            "h2DataSource",
            Artifact::rendered(
                RelativePath::try_new("grails-app/conf/datasource.yml")?,
                DATASOURCE_YML,
            ),
        )
    }
}
