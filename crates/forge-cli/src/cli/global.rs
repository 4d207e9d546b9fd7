//! Flags accepted by every `forge` subcommand.

use std::path::PathBuf;

use clap::Args;

/// Flattened into [`super::Cli`]; every field is `global = true` so the flags
/// may appear before or after the subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// `-v` info, `-vv` debug, `-vvv` trace. `RUST_LOG` wins over all of them.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "Raise the log level on stderr:
    (none)  - warnings and errors
    -v      - info: generation started / finished, manifests loaded
    -vv     - debug: resolution passes, option inference
    -vvv    - trace: every artifact registration"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and requested data"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(long = "no-color", global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new(), help = "Plain, uncoloured output")]
    pub no_color: bool,

    /// Overrides the platform config location. The file must exist, except
    /// for `forge init`, which creates it.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "FORGE_CONFIG",
        help = "Use this configuration file"
    )]
    pub config: Option<PathBuf>,

    /// `auto` falls back to `output.format` from the config, then to
    /// terminal detection.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Coloured, with headers.
    Human,
    /// No colour, no spinner.
    Plain,
    /// One JSON document on stdout.
    Json,
}
