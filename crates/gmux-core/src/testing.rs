//! Deterministic test adapters
//!
//! [`MockRunner`] records every command line and answers from scripted
//! rules, so the full tmux call sequence of an operation can be asserted
//! without a tmux server.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{
    runner::{CommandLine, Runner},
    Error, Result,
};

/// One recorded runner call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub line: String,
    pub cwd: Option<PathBuf>,
    /// Whether the call was wired to the operator's terminal.
    pub attached: bool,
}

#[derive(Debug, Clone)]
enum Response {
    Output(String),
    Failure(String),
}

#[derive(Debug)]
struct Rule {
    prefix: String,
    responses: VecDeque<Response>,
}

impl Rule {
    /// Pop the next scripted response, repeating the last one forever.
    fn next(&mut self) -> Option<Response> {
        if self.responses.len() > 1 {
            self.responses.pop_front()
        } else {
            self.responses.front().cloned()
        }
    }
}

#[derive(Debug, Default)]
struct State {
    rules: Vec<Rule>,
    invocations: Vec<Invocation>,
}

/// Recording runner with scripted outputs and failure injection.
///
/// Rules match on command-line prefix; the most recently added matching
/// rule wins. Unmatched commands succeed with empty output.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<State>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `output`.
    pub fn respond(&self, prefix: &str, output: &str) {
        self.respond_each(prefix, [output]);
    }

    /// Answer successive commands starting with `prefix` with each output in
    /// turn; the last output repeats.
    pub fn respond_each<I, S>(&self, prefix: &str, outputs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let responses = outputs
            .into_iter()
            .map(|output| Response::Output(output.into()))
            .collect();
        self.add_rule(prefix, responses);
    }

    /// Fail commands starting with `prefix`.
    pub fn fail(&self, prefix: &str, reason: &str) {
        self.add_rule(prefix, VecDeque::from([Response::Failure(reason.to_string())]));
    }

    /// Recorded command lines, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|invocation| invocation.line)
            .collect()
    }

    /// Recorded calls with their working directory and wiring.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state
            .lock()
            .map(|state| state.invocations.clone())
            .unwrap_or_default()
    }

    fn add_rule(&self, prefix: &str, responses: VecDeque<Response>) {
        if let Ok(mut state) = self.state.lock() {
            state.rules.push(Rule {
                prefix: prefix.to_string(),
                responses,
            });
        }
    }

    fn record(&self, command: &CommandLine, cwd: Option<&Path>, attached: bool) -> Result<String> {
        let line = command.to_string();
        let Ok(mut state) = self.state.lock() else {
            return Err(Error::shell(line, "mock runner state poisoned"));
        };

        state.invocations.push(Invocation {
            line: line.clone(),
            cwd: cwd.map(Path::to_path_buf),
            attached,
        });

        let response = state
            .rules
            .iter_mut()
            .rev()
            .find(|rule| line.starts_with(&rule.prefix))
            .and_then(Rule::next);

        match response {
            Some(Response::Output(output)) => Ok(output),
            Some(Response::Failure(reason)) => Err(Error::shell(line, reason)),
            None => Ok(String::new()),
        }
    }
}

impl Runner for MockRunner {
    fn run(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<String> {
        self.record(command, cwd, false)
    }

    fn run_quiet(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<()> {
        self.record(command, cwd, false).map(drop)
    }

    fn run_attached(&self, command: &CommandLine) -> Result<()> {
        self.record(command, None, true).map(drop)
    }
}
