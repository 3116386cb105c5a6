// Command-line front end: `urit [OPTIONS] <TEMPLATE> [--NAME=VALUE]...`

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use crate::config::load_variables_file;
use crate::domain::template::expand;
use crate::domain::VariableStore;

/// How the process should exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A URI was produced, possibly with recoverable diagnostics
    Success,
    /// A fatal diagnostic stopped the expansion
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

pub fn command() -> clap::Command {
    clap::Command::new("urit")
        .about("Expand RFC 6570 URI templates")
        .override_usage("urit [OPTIONS] <TEMPLATE> [--NAME=VALUE]...")
        .after_help(
            "Values starting with '(' are lists, e.g. --list='(\"a\",\"b\")'.\n\
             Values starting with '[' are maps, e.g. --keys='[(\"k1\",\"v1\"),(\"k2\",\"v2\")]'.\n\
             Options must come before the template.",
        )
        .arg(
            Arg::new("vars_file")
                .short('f')
                .long("vars-file")
                .value_name("PATH")
                .help("YAML or JSON file mapping variable names to values"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Do not list the variables before the URI"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the expansion result as JSON"),
        )
        .arg(
            Arg::new("template")
                .value_name("TEMPLATE")
                .required(true)
                .help("URI template to expand"),
        )
        .arg(
            Arg::new("assignments")
                .value_name("--NAME=VALUE")
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .help("Variable assignments"),
        )
}

/// Split `--name=value`
pub fn parse_assignment(token: &str) -> Result<(&str, &str)> {
    let Some(assignment) = token.strip_prefix("--") else {
        bail!("Expected --NAME=VALUE but got '{}'", token);
    };
    let Some((name, value)) = assignment.split_once('=') else {
        bail!("Missing '=' in variable assignment '{}'", token);
    };
    if name.is_empty() {
        bail!("Missing variable name in '{}'", token);
    }
    Ok((name, value))
}

/// Build the variable store from the variables file and the assignments
pub fn build_store(matches: &ArgMatches) -> Result<VariableStore> {
    let mut store = VariableStore::new();

    if let Some(path) = matches.get_one::<String>("vars_file") {
        load_variables_file(Path::new(path), &mut store)?;
    }

    for token in matches.get_many::<String>("assignments").into_iter().flatten() {
        let (name, value) = parse_assignment(token)?;
        store.add_variable(name, value)?;
    }

    Ok(store)
}

pub fn run(matches: &ArgMatches, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Outcome> {
    let template = matches
        .get_one::<String>("template")
        .context("Missing template")?;
    let store = build_store(matches)?;

    debug!(template = %template, variables = store.len(), "expanding template");
    let result = expand(template, &store);
    let outcome = if result.is_fatal() {
        Outcome::Failure
    } else {
        Outcome::Success
    };

    if matches.get_flag("json") {
        serde_json::to_writer_pretty(&mut *stdout, &result)?;
        writeln!(stdout)?;
        return Ok(outcome);
    }

    if !matches.get_flag("quiet") {
        write!(stdout, "{}", store)?;
    }
    if !result.diagnostics.is_empty() {
        write!(stderr, "{}", result.render_diagnostics())?;
    }
    if let Some(uri) = &result.uri {
        writeln!(stdout, "{}", uri)?;
    }

    Ok(outcome)
}
