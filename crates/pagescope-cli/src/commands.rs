//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pagescope: read declarative page objects against HTML files
#[derive(Parser, Debug)]
#[command(name = "pagescope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read properties of a page definition from an HTML file
    ///
    /// The HTML is mounted into the default test container (or the
    /// alternate one with --alternate) and every PATH is resolved against
    /// it. Without PATH arguments every declared property is read.
    Read(ReadArgs),

    /// Validate a page definition and print its node tree
    Check(CheckArgs),
}

/// Arguments for the read command
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Page definition file (.yaml/.yml, or .json)
    #[arg(short, long)]
    pub page: PathBuf,

    /// HTML markup to mount in the test container
    #[arg(long)]
    pub html: PathBuf,

    /// Mount into the alternate test container
    #[arg(long)]
    pub alternate: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Dotted property paths (e.g. `form.username`)
    pub paths: Vec<String>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Page definition file (.yaml/.yml, or .json)
    #[arg(short, long)]
    pub page: PathBuf,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// `path = value` lines
    #[default]
    Text,
    /// One JSON object keyed by path
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_read_command() {
            let cli = Cli::parse_from([
                "pagescope",
                "read",
                "--page",
                "login.yaml",
                "--html",
                "login.html",
                "form.username",
            ]);
            if let Commands::Read(args) = cli.command {
                assert_eq!(args.page, PathBuf::from("login.yaml"));
                assert_eq!(args.html, PathBuf::from("login.html"));
                assert_eq!(args.paths, vec!["form.username".to_string()]);
                assert!(!args.alternate);
                assert_eq!(args.format, FormatArg::Text);
            } else {
                panic!("expected Read command");
            }
        }

        #[test]
        fn test_parse_read_without_paths() {
            let cli = Cli::parse_from(["pagescope", "read", "-p", "a.yaml", "--html", "a.html"]);
            if let Commands::Read(args) = cli.command {
                assert!(args.paths.is_empty());
            } else {
                panic!("expected Read command");
            }
        }

        #[test]
        fn test_parse_read_alternate_json() {
            let cli = Cli::parse_from([
                "pagescope",
                "read",
                "--page",
                "a.yaml",
                "--html",
                "a.html",
                "--alternate",
                "--format",
                "json",
                "foo",
                "bar.baz",
            ]);
            if let Commands::Read(args) = cli.command {
                assert!(args.alternate);
                assert_eq!(args.format, FormatArg::Json);
                assert_eq!(args.paths.len(), 2);
            } else {
                panic!("expected Read command");
            }
        }

        #[test]
        fn test_parse_check_command() {
            let cli = Cli::parse_from(["pagescope", "check", "--page", "a.json"]);
            if let Commands::Check(args) = cli.command {
                assert_eq!(args.page, PathBuf::from("a.json"));
            } else {
                panic!("expected Check command");
            }
        }

        #[test]
        fn test_read_requires_page_and_html() {
            assert!(Cli::try_parse_from(["pagescope", "read", "--html", "a.html"]).is_err());
            assert!(Cli::try_parse_from(["pagescope", "read", "--page", "a.yaml"]).is_err());
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["pagescope"]).is_err());
        }
    }

    mod global_flag_tests {
        use super::*;
        use crate::config::ColorChoice;
        use crate::output::OutputFormat;

        #[test]
        fn test_verbose_count() {
            let cli = Cli::parse_from(["pagescope", "-vv", "check", "--page", "a.yaml"]);
            assert_eq!(cli.verbose, 2);
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::parse_from(["pagescope", "check", "--page", "a.yaml", "-q", "--color", "never"]);
            assert!(cli.quiet);
            assert!(matches!(cli.color, ColorArg::Never));
        }

        #[test]
        fn test_color_arg_conversion() {
            let auto: ColorChoice = ColorArg::Auto.into();
            assert_eq!(auto, ColorChoice::Auto);
            let always: ColorChoice = ColorArg::Always.into();
            assert_eq!(always, ColorChoice::Always);
            let never: ColorChoice = ColorArg::Never.into();
            assert_eq!(never, ColorChoice::Never);
        }

        #[test]
        fn test_format_arg_conversion() {
            assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
            assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
        }
    }
}
