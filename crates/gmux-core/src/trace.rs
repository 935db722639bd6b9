//! Command trace sinks
//!
//! The runner reports every command line it executes, and the failure text
//! of every command that fails, to an injected [`CommandTrace`]. Nothing in
//! gmux reads the trace back.

use std::sync::{Arc, Mutex};

/// Receives a record of every executed command.
pub trait CommandTrace: Send + Sync {
    /// Called before a command is executed.
    fn command(&self, line: &str);

    /// Called after a command failed.
    fn failure(&self, line: &str, reason: &str);
}

/// Emits trace records as `tracing` events on the `gmux::exec` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

impl CommandTrace for TracingTrace {
    fn command(&self, line: &str) {
        tracing::debug!(target: "gmux::exec", "{line}");
    }

    fn failure(&self, line: &str, reason: &str) {
        tracing::debug!(target: "gmux::exec", command = line, "{reason}");
    }
}

/// Keeps every record in memory, in order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTrace {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded lines; failures are prefixed with `! `.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl CommandTrace for MemoryTrace {
    fn command(&self, line: &str) {
        self.push(line.to_string());
    }

    fn failure(&self, line: &str, reason: &str) {
        self.push(format!("! {line}: {reason}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_trace_records_in_order() {
        let trace = MemoryTrace::new();
        trace.command("tmux has-session -t work:");
        trace.failure("tmux has-session -t work:", "exit status: 1");

        assert_eq!(
            trace.lines(),
            vec![
                "tmux has-session -t work:".to_string(),
                "! tmux has-session -t work:: exit status: 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_memory_trace_clones_share_records() {
        let trace = MemoryTrace::new();
        let handle = trace.clone();
        handle.command("/bin/sh -c make");
        assert_eq!(trace.lines().len(), 1);
    }
}
