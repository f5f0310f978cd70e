//! crates/cli/src/arguments.rs
//! Command-line definition and parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

/// Name used in diagnostics and when `argv` is empty.
pub(crate) const PROGRAM_NAME: &str = "formlog";

/// Deterministic help text describing the supported options.
pub(crate) const HELP_TEXT: &str = concat!(
    "Usage: formlog [OPTIONS] [FORM]...\n",
    "\n",
    "Resolves whether messages logged under each FORM would be printed.\n",
    "With --stdin, filters lines of the shape 'FORM: message'. Without\n",
    "forms or --stdin, prints the effective configuration as JSON.\n",
    "\n",
    "Options:\n",
    "      --config FILE      Load a JSON form configuration.\n",
    "  -f, --form DIRECTIVE   Set a form: NAME, +NAME, -NAME or NAME=on|off.\n",
    "  -c, --category DEF     Define a category: CATEGORY=TYPE[,TYPE...].\n",
    "  -a, --add-types DEF    Add types to a category: CATEGORY=TYPE[,TYPE...].\n",
    "      --off              Turn logging off entirely.\n",
    "      --explain          Report the rule deciding each form.\n",
    "      --stdin            Filter standard input instead of querying forms.\n",
    "  -v, --verbose          Trace resolver decisions on stderr (repeatable).\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
);

/// Parsed command produced by [`parse_args`].
///
/// **Warning**: This type is exposed via `cli::test_utils` for integration
/// tests only. It is not part of the stable public API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// `--help`/`-h`.
    pub show_help: bool,
    /// `--version`/`-V`.
    pub show_version: bool,
    /// `--config FILE`.
    pub config: Option<PathBuf>,
    /// `--form` directives in command-line order.
    pub directives: Vec<String>,
    /// `--category` definitions in command-line order.
    pub categories: Vec<String>,
    /// `--add-types` definitions in command-line order.
    pub additions: Vec<String>,
    /// `--off`.
    pub off: bool,
    /// `--explain`.
    pub explain: bool,
    /// `--stdin`.
    pub stdin: bool,
    /// Number of `--verbose` flags.
    pub verbosity: u8,
    /// Positional forms to query.
    pub forms: Vec<String>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Load a JSON form configuration.")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("form")
                .long("form")
                .short('f')
                .value_name("DIRECTIVE")
                .help("Set a form: NAME, +NAME, -NAME or NAME=on|off.")
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .short('c')
                .value_name("DEF")
                .help("Define a category: CATEGORY=TYPE[,TYPE...].")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("add-types")
                .long("add-types")
                .short('a')
                .value_name("DEF")
                .help("Add types to a category: CATEGORY=TYPE[,TYPE...].")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("off")
                .long("off")
                .help("Turn logging off entirely.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("Report the rule deciding each form.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .help("Filter standard input instead of querying forms.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Trace resolver decisions on stderr (repeatable).")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("forms")
                .value_name("FORM")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
///
/// # Errors
///
/// Returns the `clap` error for unknown options or missing values.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;
    let mut strings = |id: &str| -> Vec<String> {
        matches
            .remove_many::<String>(id)
            .map(|values| values.collect())
            .unwrap_or_default()
    };

    let directives = strings("form");
    let categories = strings("category");
    let additions = strings("add-types");
    let forms = strings("forms");

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        config: matches.remove_one::<PathBuf>("config"),
        directives,
        categories,
        additions,
        off: matches.get_flag("off"),
        explain: matches.get_flag("explain"),
        stdin: matches.get_flag("stdin"),
        verbosity: matches.get_count("verbose"),
        forms,
    })
}
