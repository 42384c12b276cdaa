//! Flags shared by `render`, `locations` and `config`.

use clap::Args;
use std::path::PathBuf;

/// Logging, colour, config-file and output-format switches.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log view resolution to stderr; repeat for more detail.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log view resolution to stderr (-v, -vv, -vvv)",
        long_help = "Log view resolution to stderr. RUST_LOG, when set, wins.
    (none)  - warnings (a view that was not found) and errors
    -v      - one line per rendered view
    -vv     - which engine call resolved the view
    -vvv    - every searched location and template load"
    )]
    pub verbose: u8,

    /// Drop status lines such as the `locations` header.
    ///
    /// Rendered markup and JSON documents are results, not status, and are
    /// written regardless.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print results (rendered views, JSON) and errors"
    )]
    pub quiet: bool,

    /// Plain status lines and error reports. Never changes rendered output.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Print status lines and errors without ANSI colours"
    )]
    pub no_color: bool,

    /// Settings file layered between the defaults and `VIEWSTRING__*`
    /// environment variables. Must exist when given.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Settings file to use instead of the per-user viewstring.toml"
    )]
    pub config: Option<PathBuf>,

    /// Shape of the non-markup output of `locations` and `config list`.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        value_name = "FORMAT",
        default_value = "auto",
        help = "How `locations` and `config list` report: human, plain or json"
    )]
    pub output_format: OutputFormat,
}

/// Report format for commands whose result is not rendered markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured marks and headers.
    Human,
    /// The same lines without colour.
    Plain,
    /// One JSON document: the candidate list or the effective settings.
    Json,
}

impl OutputFormat {
    /// Pin `Auto` to a concrete format for the given stdout.
    pub fn resolve(self, stdout_is_terminal: bool) -> Self {
        match self {
            Self::Auto if stdout_is_terminal => Self::Human,
            Self::Auto => Self::Plain,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_follows_the_terminal() {
        assert_eq!(OutputFormat::Auto.resolve(true), OutputFormat::Human);
        assert_eq!(OutputFormat::Auto.resolve(false), OutputFormat::Plain);
        assert_eq!(OutputFormat::Json.resolve(true), OutputFormat::Json);
    }
}
