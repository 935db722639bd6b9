//! Shell command runner
//!
//! Every external effect gmux has, including every tmux call, goes through a
//! [`Runner`]. Calls block until the child exits; no timeout is imposed.

use std::{
    fmt,
    path::Path,
    process::{Command, Output, Stdio},
    sync::Arc,
};

use crate::{
    trace::{CommandTrace, TracingTrace},
    Error, Result,
};

/// Shell used for `before_start` and `stop` commands.
pub const SHELL: &str = "/bin/sh";

/// A program and its arguments, rendered space-joined in traces and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `/bin/sh -c <script>`
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new(SHELL).arg("-c").arg(script)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    fn to_command(&self, cwd: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = cwd.filter(|dir| !dir.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        self.args.iter().try_for_each(|arg| write!(f, " {arg}"))
    }
}

/// Executes command lines.
pub trait Runner {
    /// Run and capture output, with one trailing newline trimmed.
    ///
    /// The output is all of stdout followed by all of stderr, not
    /// interleaved. Both streams are decoded lossily, so bytes that are not
    /// UTF-8 (for instance in a reported pane path) come back as U+FFFD.
    fn run(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<String>;

    /// Run with all standard streams discarded.
    fn run_quiet(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<()>;

    /// Run wired to the operator's terminal, blocking until the child exits.
    fn run_attached(&self, command: &CommandLine) -> Result<()>;
}

/// Runner that spawns real processes.
#[derive(Clone)]
pub struct ShellRunner {
    trace: Arc<dyn CommandTrace>,
}

impl ShellRunner {
    pub fn new(trace: Arc<dyn CommandTrace>) -> Self {
        Self { trace }
    }

    fn fail(&self, line: &str, reason: String) -> Error {
        self.trace.failure(line, &reason);
        Error::shell(line, reason)
    }

    fn check_status(&self, line: &str, status: std::io::Result<std::process::ExitStatus>) -> Result<()> {
        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(self.fail(line, status.to_string())),
            Err(e) => Err(self.fail(line, e.to_string())),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(Arc::new(TracingTrace))
    }
}

impl fmt::Debug for ShellRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellRunner").finish_non_exhaustive()
    }
}

impl Runner for ShellRunner {
    fn run(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<String> {
        let line = command.to_string();
        self.trace.command(&line);

        let Output {
            status,
            stdout,
            stderr,
        } = command
            .to_command(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.fail(&line, e.to_string()))?;

        let mut combined = String::from_utf8_lossy(&stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&stderr));

        if !status.success() {
            let reason = match combined.trim() {
                "" => status.to_string(),
                output => format!("{status}: {output}"),
            };
            return Err(self.fail(&line, reason));
        }

        Ok(combined
            .strip_suffix('\n')
            .map(str::to_string)
            .unwrap_or(combined))
    }

    fn run_quiet(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<()> {
        let line = command.to_string();
        self.trace.command(&line);

        let status = command
            .to_command(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        self.check_status(&line, status)
    }

    fn run_attached(&self, command: &CommandLine) -> Result<()> {
        let line = command.to_string();
        self.trace.command(&line);

        let status = command
            .to_command(None)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();
        self.check_status(&line, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::MemoryTrace;

    fn runner() -> (ShellRunner, MemoryTrace) {
        let trace = MemoryTrace::new();
        (ShellRunner::new(Arc::new(trace.clone())), trace)
    }

    #[test]
    fn test_command_line_display() {
        let cmd = CommandLine::new("tmux")
            .args(["send-keys", "-t", "work:code"])
            .arg("make test")
            .arg("Enter");
        assert_eq!(cmd.to_string(), "tmux send-keys -t work:code make test Enter");
    }

    #[test]
    fn test_shell_command_line() {
        let cmd = CommandLine::shell("echo hi");
        assert_eq!(cmd.program(), SHELL);
        assert_eq!(cmd.arguments(), ["-c", "echo hi"]);
    }

    #[test]
    fn test_run_captures_output() -> Result<()> {
        let (runner, trace) = runner();
        let output = runner.run(&CommandLine::shell("echo hello"), None)?;
        assert_eq!(output, "hello");
        assert_eq!(trace.lines(), vec!["/bin/sh -c echo hello".to_string()]);
        Ok(())
    }

    #[test]
    fn test_run_uses_working_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (runner, _) = runner();
        let output = runner.run(&CommandLine::shell("pwd -P"), Some(dir.path()))?;
        let expected = dir.path().canonicalize()?;
        assert_eq!(output, expected.display().to_string());
        Ok(())
    }

    #[test]
    fn test_run_failure_carries_command_line() {
        let (runner, trace) = runner();
        let result = runner.run(&CommandLine::shell("exit 3"), None);

        let Err(Error::Shell { command, reason }) = result else {
            panic!("expected shell error");
        };
        assert_eq!(command, "/bin/sh -c exit 3");
        assert!(reason.contains('3'));
        assert_eq!(trace.lines().len(), 2);
    }

    #[test]
    fn test_run_spawn_failure() {
        let (runner, _) = runner();
        let result = runner.run(&CommandLine::new("/nonexistent/gmux-binary"), None);
        assert!(matches!(result, Err(Error::Shell { .. })));
    }

    #[test]
    fn test_run_appends_stderr_after_stdout() -> Result<()> {
        let (runner, _) = runner();
        let output = runner.run(&CommandLine::shell("echo err >&2; echo out"), None)?;
        assert_eq!(output, "out\nerr");
        Ok(())
    }

    #[test]
    fn test_run_decodes_invalid_utf8_lossily() -> Result<()> {
        let (runner, _) = runner();
        let output = runner.run(&CommandLine::shell("printf '/srv/\\377'"), None)?;
        assert_eq!(output, "/srv/\u{FFFD}");
        Ok(())
    }

    #[test]
    fn test_run_quiet() {
        let (runner, _) = runner();
        assert!(runner.run_quiet(&CommandLine::shell("true"), None).is_ok());
        assert!(runner.run_quiet(&CommandLine::shell("false"), None).is_err());
    }
}
