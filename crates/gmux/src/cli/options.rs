//! Command-line options
//!
//! The first argument picks the verb. The first positional after it is the
//! target (`project` or `project:win1,win2`) unless `--file` is given, and
//! every positional of the form `key=value` becomes a setting.

use std::{collections::BTreeMap, path::PathBuf};

use clap::{error::ErrorKind, ArgMatches};
use gmux_core::Options;

use crate::cli::build_cli;

/// Operation selected by the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Start,
    Stop,
    New,
    Edit,
    List,
    Print,
}

impl Verb {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "new" => Some(Self::New),
            "edit" => Some(Self::Edit),
            "list" => Some(Self::List),
            "print" => Some(Self::Print),
            _ => None,
        }
    }
}

/// A fully parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub verb: Verb,
    pub options: Options,
    pub file: Option<PathBuf>,
    pub debug: bool,
}

/// Outcome of parsing that is not a failure.
#[derive(Debug)]
pub enum Parsed {
    Run(Invocation),
    /// No verb, `-h`/`--help`, or an unknown verb.
    Usage,
    /// A verb's own `--help`, rendered by clap.
    Help(clap::Error),
}

/// Parse `argv` without the program name.
///
/// # Errors
///
/// Returns the clap error for unknown flags and missing flag values.
pub fn parse<I, S>(argv: I) -> Result<Parsed, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    let Some(verb) = argv.first().and_then(|first| Verb::from_name(first)) else {
        return Ok(Parsed::Usage);
    };

    let matches = match build_cli().try_get_matches_from(std::iter::once("gmux".to_string()).chain(argv)) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(Parsed::Help(e));
        }
        Err(e) => return Err(e),
    };

    Ok(matches
        .subcommand()
        .map_or(Parsed::Usage, |(_, sub_m)| Parsed::Run(invocation(verb, sub_m))))
}

/// First line of a clap error without its `error: ` prefix.
pub fn describe(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

fn invocation(verb: Verb, sub_m: &ArgMatches) -> Invocation {
    let positionals = strings(sub_m, "args");
    let file = sub_m.get_one::<String>("file").map(PathBuf::from);

    let (project, target_windows) = match (&file, positionals.first()) {
        (None, Some(target)) => parse_target(target),
        _ => (String::new(), None),
    };

    Invocation {
        verb,
        options: Options {
            windows: target_windows.unwrap_or_else(|| strings(sub_m, "windows")),
            attach: sub_m.get_flag("attach"),
            detach: sub_m.get_flag("detach"),
            inside_current_session: sub_m.get_flag("inside-current-session"),
            project,
            settings: parse_settings(&positionals),
        },
        file,
        debug: sub_m.get_flag("debug"),
    }
}

fn strings(sub_m: &ArgMatches, id: &str) -> Vec<String> {
    sub_m
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Split `project:win1,win2` into the project and its window list.
///
/// A target without `:` names no windows.
pub fn parse_target(target: &str) -> (String, Option<Vec<String>>) {
    match target.split_once(':') {
        Some((project, windows)) => (
            project.to_string(),
            Some(
                windows
                    .split(',')
                    .filter(|window| !window.is_empty())
                    .map(ToString::to_string)
                    .collect(),
            ),
        ),
        None => (target.to_string(), None),
    }
}

/// Collect `key=value` arguments; anything without `=` is skipped.
pub fn parse_settings(args: &[String]) -> BTreeMap<String, String> {
    args.iter()
        .filter_map(|arg| arg.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
