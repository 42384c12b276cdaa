//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No rendering logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "viewstring",
    bin_name = "viewstring",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render a named view with a model into a string",
    long_about = "viewstring resolves a view by path or by conventional search \
                  under a content root, binds a JSON model and prints the result.",
    after_help = "EXAMPLES:\n\
        \x20 viewstring render Invoice --model invoice.json\n\
        \x20 viewstring render /Views/Mail/Welcome.jinja --model - < user.json\n\
        \x20 viewstring locations Invoice --controller Billing\n\
        \x20 viewstring config list",
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
    /// Render a view to stdout or a file.
    #[command(
        visible_alias = "r",
        about = "Render a view",
        after_help = "EXAMPLES:\n\
            \x20 viewstring render Invoice --model invoice.json\n\
            \x20 viewstring render ~/Views/Shared/Card.jinja --model -\n\
            \x20 viewstring render Invoice --content-root ./site --out invoice.html"
    )]
    Render(RenderArgs),

    /// Show where a view would be looked up.
    #[command(
        visible_alias = "ls",
        about = "List the locations searched for a view",
        after_help = "EXAMPLES:\n\
            \x20 viewstring locations Invoice\n\
            \x20 viewstring locations Index --controller Home --area Admin\n\
            \x20 viewstring locations /Views/Mail/Welcome.jinja"
    )]
    Locations(LocationsArgs),

    /// Inspect configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 viewstring config list\n\
            \x20 viewstring config path"
    )]
    Config(ConfigCommands),
}

/// Where views live, shared by every command that builds an engine.
#[derive(Debug, Args)]
pub struct ContentRootArg {
    /// Overrides `engine.content_root` from configuration.
    #[arg(
        short = 'r',
        long = "content-root",
        value_name = "DIR",
        help = "Directory views are resolved under"
    )]
    pub content_root: Option<PathBuf>,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `viewstring render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// View name or path.  A plain name such as `Invoice` is searched for;
    /// `/Views/...`, `~/Views/...` and `Name.jinja` are looked up directly.
    #[arg(value_name = "VIEW", help = "View name or path")]
    pub view: String,

    #[arg(
        short = 'm',
        long = "model",
        value_name = "FILE",
        help = "JSON model file, or - for stdin (default: {})"
    )]
    pub model: Option<PathBuf>,

    #[command(flatten)]
    pub root: ContentRootArg,

    #[arg(
        short = 'o',
        long = "out",
        value_name = "FILE",
        help = "Write the rendered view to FILE instead of stdout"
    )]
    pub out: Option<PathBuf>,
}

// ── locations ─────────────────────────────────────────────────────────────────

/// Arguments for `viewstring locations`.
#[derive(Debug, Args)]
pub struct LocationsArgs {
    #[arg(value_name = "VIEW", help = "View name or path")]
    pub view: String,

    #[command(flatten)]
    pub root: ContentRootArg,

    #[arg(
        long = "controller",
        value_name = "NAME",
        help = "Controller route value used to expand {1}"
    )]
    pub controller: Option<String>,

    #[arg(
        long = "area",
        value_name = "NAME",
        help = "Area route value used to expand {2}"
    )]
    pub area: Option<String>,
}

// ── config ────────────────────────────────────────────────────────────────────

/// `viewstring config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    List,
    /// Print the path to the default configuration file.
    Path,
}
