//! crates/cli/src/execution.rs
//! Applies parsed arguments: builds the registry, answers queries and
//! filters standard input.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use logging::{
    ConfigError, Form, FormConfig, FormRegistry, Logger, MessageSink, apply_directive,
    parse_category_definition,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::arguments::{HELP_TEXT, PROGRAM_NAME, ParsedArgs};

/// Failure while executing a parsed command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A directive or category definition was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The `--config` file could not be loaded.
    #[error("{}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    /// Standard input could not be read.
    #[error("failed to read standard input: {0}")]
    Input(#[source] io::Error),
    /// Standard output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Exit code reported for this failure.
    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::Io(_))
            | Self::ConfigFile {
                source: ConfigError::Io(_),
                ..
            }
            | Self::Input(_)
            | Self::Output(_) => 2,
            Self::Config(_) | Self::ConfigFile { .. } => 1,
        }
    }
}

pub(crate) fn execute<In, Out>(
    parsed: &ParsedArgs,
    stdin: In,
    stdout: &mut Out,
) -> Result<(), CliError>
where
    In: BufRead,
    Out: Write,
{
    if parsed.show_help {
        return stdout
            .write_all(HELP_TEXT.as_bytes())
            .map_err(CliError::Output);
    }

    if parsed.show_version {
        return writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION"))
            .map_err(CliError::Output);
    }

    install_tracing(parsed.verbosity);
    let registry = build_registry(parsed)?;
    tracing::debug!(
        target: "formlog::cli",
        forms = parsed.forms.len(),
        stdin = parsed.stdin,
        "registry ready"
    );

    if parsed.forms.is_empty() && !parsed.stdin {
        let json = FormConfig::from_registry(&registry).to_json_string()?;
        return writeln!(stdout, "{json}").map_err(CliError::Output);
    }

    query_forms(&registry, &parsed.forms, parsed.explain, stdout)?;
    if parsed.stdin {
        filter_lines(registry, stdin, stdout)?;
    }
    stdout.flush().map_err(CliError::Output)
}

/// Builds the registry described by the configuration file and options.
///
/// The configuration file is applied first, then category definitions,
/// type additions, form directives and finally `--off`.
pub(crate) fn build_registry(parsed: &ParsedArgs) -> Result<FormRegistry, CliError> {
    let mut registry = match &parsed.config {
        Some(path) => FormConfig::from_json_path(path)
            .and_then(|config| config.to_registry())
            .map_err(|source| CliError::ConfigFile {
                path: path.clone(),
                source,
            })?,
        None => FormRegistry::new(),
    };

    for definition in &parsed.categories {
        let (category, types) = parse_category_definition(definition)?;
        registry.categorize(category, types);
    }
    for definition in &parsed.additions {
        let (category, types) = parse_category_definition(definition)?;
        registry.add_types(category, types);
    }
    for directive in &parsed.directives {
        apply_directive(&mut registry, directive)?;
    }
    if parsed.off {
        registry.set_enabled(false);
    }
    Ok(registry)
}

fn query_forms<Out: Write>(
    registry: &FormRegistry,
    forms: &[String],
    explain: bool,
    stdout: &mut Out,
) -> Result<(), CliError> {
    for name in forms {
        let form = Form::new(name);
        let resolution = registry.resolve(Some(&form));
        let written = if explain {
            writeln!(stdout, "{form}: {resolution}")
        } else {
            let verdict = if resolution.emits() { "enabled" } else { "disabled" };
            writeln!(stdout, "{form}: {verdict}")
        };
        written.map_err(CliError::Output)?;
    }
    Ok(())
}

/// Prints each input line whose form is enabled.
///
/// Lines read `FORM: message`; only the message is printed. Lines without a
/// form prefix resolve with no current form and are printed whole.
fn filter_lines<In, Out>(registry: FormRegistry, stdin: In, stdout: &mut Out) -> Result<(), CliError>
where
    In: BufRead,
    Out: Write,
{
    let mut log = Logger::from_parts(registry, MessageSink::new(&mut *stdout));
    for line in stdin.lines() {
        let line = line.map_err(CliError::Input)?;
        let (form, message) = split_record(&line);
        log.out_with_form(form.as_ref(), message)
            .map_err(CliError::Output)?;
    }
    log.consumer_mut().flush().map_err(CliError::Output)
}

fn split_record(line: &str) -> (Option<Form>, &str) {
    match line.split_once(':') {
        Some((form, message)) if !form.trim().is_empty() => (
            Some(Form::new(form.trim())),
            message.strip_prefix(' ').unwrap_or(message),
        ),
        _ => (None, line),
    }
}

fn install_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        },
        1 => EnvFilter::new("formlog=debug"),
        _ => EnvFilter::new("formlog=trace"),
    };

    // A subscriber installed by an embedding program takes precedence.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
