//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use forge_core::domain::{ApplicationType, BuildTool, GormImpl, JdkVersion, Language, TestFramework};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "forge",
    bin_name = "forge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2692} Feature-driven application generator",
    long_about = "Forge generates application skeletons from a set of named \
                  features, resolving exclusions and implied features against \
                  the chosen options before writing anything.",
    after_help = "EXAMPLES:\n\
        \x20 forge create demo --features springloaded --jdk 11\n\
        \x20 forge preview demo --type rest-api --features rabbitmq --format json\n\
        \x20 forge list --type web\n\
        \x20 forge completions bash > /usr/share/bash-completion/completions/forge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new application.
    #[command(
        visible_alias = "new",
        about = "Create a new application",
        after_help = "EXAMPLES:\n\
            \x20 forge create demo\n\
            \x20 forge create demo --jdk 11 --features springloaded,gradle-wrapper\n\
            \x20 forge new api --type rest-api --lang java --test junit --yes"
    )]
    Create(CreateArgs),

    /// Render the application in memory and print it.
    #[command(
        about = "Preview generated files without writing them",
        after_help = "EXAMPLES:\n\
            \x20 forge preview demo --features h2\n\
            \x20 forge preview demo --format json | jq '.files | keys'"
    )]
    Preview(PreviewArgs),

    /// List available features.
    #[command(
        visible_alias = "ls",
        about = "List available features",
        after_help = "EXAMPLES:\n\
            \x20 forge list\n\
            \x20 forge list --type plugin\n\
            \x20 forge list --all --format json"
    )]
    List(ListArgs),

    /// Initialise a Forge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 forge init           # platform config location\n\
            \x20 forge init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 forge completions bash > ~/.local/share/bash-completion/completions/forge\n\
            \x20 forge completions zsh  > ~/.zfunc/_forge\n\
            \x20 forge completions fish > ~/.config/fish/completions/forge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Forge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 forge config get defaults.jdk\n\
            \x20 forge config list\n\
            \x20 forge config path"
    )]
    Config(ConfigCommands),
}

// ── shared generation options ─────────────────────────────────────────────────

/// Options shared by `create` and `preview`.
///
/// Anything left unset falls back to the `[defaults]` section of the
/// configuration, then to what the application type implies.
#[derive(Debug, Clone, Args)]
pub struct GenerationArgs {
    /// Application name. Used as the directory name.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: String,

    #[arg(short = 't', long = "type", value_enum, value_name = "TYPE", help = "Application type")]
    pub application_type: Option<AppTypeArg>,

    #[arg(short = 'b', long = "build", value_enum, value_name = "TOOL", help = "Build tool")]
    pub build_tool: Option<BuildArg>,

    #[arg(long = "test", value_enum, value_name = "FRAMEWORK", help = "Test framework")]
    pub test_framework: Option<TestArg>,

    #[arg(short = 'g', long = "gorm", value_enum, value_name = "IMPL", help = "GORM implementation")]
    pub gorm: Option<GormArg>,

    #[arg(short = 'j', long = "jdk", value_enum, value_name = "VERSION", help = "Target JDK")]
    pub jdk: Option<JdkArg>,

    #[arg(short = 'l', long = "lang", value_enum, value_name = "LANGUAGE", help = "Source language")]
    pub language: Option<LangArg>,

    /// Features to include, comma separated or repeated.
    #[arg(
        short = 'f',
        long = "features",
        value_name = "NAME",
        value_delimiter = ',',
        help = "Features to include (comma separated)"
    )]
    pub features: Vec<String>,

    /// Directory of `feature.toml` manifests to load next to the built-ins.
    #[arg(long = "features-dir", value_name = "DIR", help = "Extra feature manifests")]
    pub features_dir: Option<PathBuf>,

    /// Directory that binary artifact references resolve against.
    #[arg(long = "resources", value_name = "DIR", help = "Binary resource directory")]
    pub resources: Option<PathBuf>,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `forge create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Parent directory of the generated application.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and create immediately")]
    pub yes: bool,

    /// Resolve and report without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── preview ───────────────────────────────────────────────────────────────────

/// Arguments for `forge preview`.
#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    #[arg(long = "format", value_enum, default_value = "text", help = "Preview format")]
    pub format: PreviewFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewFormat {
    /// Every file with a header line.
    Text,
    /// The whole preview as one JSON document.
    Json,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `forge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only features offered for this application type.
    #[arg(short = 't', long = "type", value_enum, help = "Filter by application type")]
    pub application_type: Option<AppTypeArg>,

    /// Include hidden features.
    #[arg(long = "all", help = "Show all features including hidden ones")]
    pub all: bool,

    #[arg(long = "features-dir", value_name = "DIR", help = "Extra feature manifests")]
    pub features_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table", help = "Output format")]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `forge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `forge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `forge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.jdk`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppTypeArg {
    Web,
    #[value(alias = "rest")]
    RestApi,
    WebPlugin,
    Plugin,
}

impl From<AppTypeArg> for ApplicationType {
    fn from(arg: AppTypeArg) -> Self {
        match arg {
            AppTypeArg::Web => Self::Web,
            AppTypeArg::RestApi => Self::RestApi,
            AppTypeArg::WebPlugin => Self::WebPlugin,
            AppTypeArg::Plugin => Self::Plugin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildArg {
    Gradle,
    #[value(alias = "kts")]
    GradleKotlin,
}

impl From<BuildArg> for BuildTool {
    fn from(arg: BuildArg) -> Self {
        match arg {
            BuildArg::Gradle => Self::Gradle,
            BuildArg::GradleKotlin => Self::GradleKotlin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestArg {
    Spock,
    Junit,
}

impl From<TestArg> for TestFramework {
    fn from(arg: TestArg) -> Self {
        match arg {
            TestArg::Spock => Self::Spock,
            TestArg::Junit => Self::Junit,
        }
    }
}

/// `none` turns GORM off even when the application type implies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GormArg {
    Hibernate,
    #[value(alias = "mongo")]
    Mongodb,
    Neo4j,
    None,
}

impl GormArg {
    pub fn to_core(self) -> Option<GormImpl> {
        match self {
            Self::Hibernate => Some(GormImpl::Hibernate),
            Self::Mongodb => Some(GormImpl::Mongodb),
            Self::Neo4j => Some(GormImpl::Neo4j),
            Self::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JdkArg {
    #[value(name = "8")]
    Jdk8,
    #[value(name = "11")]
    Jdk11,
    #[value(name = "17")]
    Jdk17,
    #[value(name = "21")]
    Jdk21,
}

impl From<JdkArg> for JdkVersion {
    fn from(arg: JdkArg) -> Self {
        match arg {
            JdkArg::Jdk8 => Self::Jdk8,
            JdkArg::Jdk11 => Self::Jdk11,
            JdkArg::Jdk17 => Self::Jdk17,
            JdkArg::Jdk21 => Self::Jdk21,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    Groovy,
    Java,
    #[value(alias = "kt")]
    Kotlin,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::Groovy => Self::Groovy,
            LangArg::Java => Self::Java,
            LangArg::Kotlin => Self::Kotlin,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from([
            "forge",
            "create",
            "demo",
            "--jdk",
            "11",
            "--features",
            "web,springloaded",
            "--yes",
        ]);
        let Commands::Create(args) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(args.generation.name, "demo");
        assert_eq!(args.generation.jdk, Some(JdkArg::Jdk11));
        assert_eq!(args.generation.features, vec!["web", "springloaded"]);
        assert!(args.yes);
    }

    #[test]
    fn new_is_an_alias_for_create() {
        let cli = Cli::parse_from(["forge", "new", "demo"]);
        assert!(matches!(cli.command, Commands::Create(_)));
    }

    #[test]
    fn repeated_feature_flags_accumulate() {
        let cli = Cli::parse_from(["forge", "preview", "demo", "-f", "h2", "-f", "rabbitmq"]);
        let Commands::Preview(args) = cli.command else {
            panic!("expected Preview command");
        };
        assert_eq!(args.generation.features, vec!["h2", "rabbitmq"]);
        assert_eq!(args.format, PreviewFormat::Text);
    }

    #[test]
    fn type_accepts_kebab_case_and_alias() {
        let cli = Cli::parse_from(["forge", "list", "--type", "rest-api"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.application_type, Some(AppTypeArg::RestApi));

        assert!(Cli::try_parse_from(["forge", "list", "--type", "rest"]).is_ok());
        assert!(Cli::try_parse_from(["forge", "list", "--type", "desktop"]).is_err());
    }

    #[test]
    fn unsupported_jdk_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["forge", "create", "demo", "--jdk", "9"]).is_err());
    }

    #[test]
    fn gorm_none_maps_to_no_implementation() {
        assert_eq!(GormArg::None.to_core(), None);
        assert_eq!(GormArg::Mongodb.to_core(), Some(GormImpl::Mongodb));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["forge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
