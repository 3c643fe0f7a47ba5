//! Runs a single command string through the host shell.
//!
//! The child inherits the terminal, so its output is never captured or parsed. Failures
//! and Ctrl+C are returned as a [`CommandOutcome`] instead of an error, so a broken
//! build never takes the menu down with it.

use crate::models::Platform;
use colored::*;
use std::fmt;
use std::io;
use std::process::ExitStatus;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Width of the dashed rule printed under the echoed command.
const RULE_WIDTH: usize = 50;

/// Signal number of SIGINT on every unix we build for.
#[cfg(unix)]
const SIGINT: i32 = 2;

#[cfg(unix)]
type InterruptListener = tokio::signal::unix::Signal;
#[cfg(windows)]
type InterruptListener = tokio::signal::windows::CtrlC;

/// Registers for Ctrl+C right away, before the child is spawned.
///
/// `tokio::signal::ctrl_c()` only registers on first poll, which would leave a window
/// where the signal is missed.
fn listen_for_interrupt() -> io::Result<InterruptListener> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::interrupt())
    }

    #[cfg(windows)]
    {
        tokio::signal::windows::ctrl_c()
    }
}

/// How a command invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The child exited with status zero.
    Success,
    /// The child exited nonzero or could not be started. Holds the underlying cause.
    Failed(String),
    /// The user pressed Ctrl+C while the child was running.
    Interrupted,
}

impl CommandOutcome {
    /// Classifies a child's exit status. A child killed by SIGINT counts as interrupted,
    /// whether or not our own listener saw the signal first.
    fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if status.signal() == Some(SIGINT) {
                return CommandOutcome::Interrupted;
            }
        }

        if status.success() {
            CommandOutcome::Success
        } else {
            CommandOutcome::Failed(status.to_string())
        }
    }

    /// The user-facing line for a failed or interrupted command, without styling.
    ///
    /// `None` for successful commands; their own output is already on screen.
    pub fn report_line(&self) -> Option<String> {
        match self {
            CommandOutcome::Success => None,
            CommandOutcome::Failed(reason) => Some(format!("Error: command failed - {}", reason)),
            CommandOutcome::Interrupted => Some("Command interrupted".to_string()),
        }
    }

    /// Prints [`report_line`](Self::report_line), red for failures and yellow for interrupts.
    pub fn report(&self) {
        if let Some(line) = self.report_line() {
            match self {
                CommandOutcome::Interrupted => println!("\n\n{}", line.yellow()),
                _ => println!("\n{}", line.red()),
            }
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Success => write!(f, "success"),
            CommandOutcome::Failed(reason) => write!(f, "failed ({})", reason),
            CommandOutcome::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Something that can execute a command string to completion.
///
/// The menu loop only talks to this trait, which lets tests record dispatched
/// commands without spawning anything.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Executes `command`, blocking the caller until it finishes or is interrupted.
    async fn run(&self, command: &str) -> CommandOutcome;
}

/// Executes commands via `sh -c` (POSIX) or `cmd /C` (Windows).
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    command_flag: String,
}

impl ShellRunner {
    /// Creates a runner that uses the shell of `platform`.
    pub fn new(platform: Platform) -> Self {
        let (shell, command_flag) = match platform {
            Platform::Windows => ("cmd", "/C"),
            Platform::Posix => ("sh", "-c"),
        };
        Self {
            shell: shell.to_string(),
            command_flag: command_flag.to_string(),
        }
    }

    /// Creates a runner with an arbitrary shell program.
    ///
    /// Used in tests to exercise the spawn failure path.
    #[cfg(test)]
    pub fn with_shell(shell: &str, command_flag: &str) -> Self {
        Self {
            shell: shell.to_string(),
            command_flag: command_flag.to_string(),
        }
    }

    /// Builds the shell invocation for `command`. Stdio is inherited.
    fn shell_command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg(&self.command_flag).arg(command);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> CommandOutcome {
        println!("\n{} {}", "Running:".cyan().bold(), command);
        println!("{}", "-".repeat(RULE_WIDTH));

        let mut interrupt = match listen_for_interrupt() {
            Ok(listener) => listener,
            Err(e) => {
                warn!("Cannot listen for Ctrl+C: {}", e);
                return CommandOutcome::Failed(e.to_string());
            },
        };

        let started = Instant::now();
        let mut child = match self.shell_command(command).spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn `{}`: {}", command, e);
                return CommandOutcome::Failed(e.to_string());
            },
        };
        debug!("Spawned `{}` (pid {:?})", command, child.id());

        // Ctrl+C reaches the child too, so both branches can be ready at once.
        let outcome = tokio::select! {
            biased;
            _ = interrupt.recv() => {
                if let Err(e) = child.kill().await {
                    debug!("Child already exited after interrupt: {}", e);
                }
                CommandOutcome::Interrupted
            },
            status = child.wait() => match status {
                Ok(status) => CommandOutcome::from_status(status),
                Err(e) => CommandOutcome::Failed(e.to_string()),
            },
        };

        info!("`{}` finished after {:?}: {}", command, started.elapsed(), outcome);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn outcome_display() {
        assert_eq!(CommandOutcome::Success.to_string(), "success");
        assert_eq!(
            CommandOutcome::Failed("exit status: 2".to_string()).to_string(),
            "failed (exit status: 2)"
        );
        assert_eq!(CommandOutcome::Interrupted.to_string(), "interrupted");
    }

    #[test]
    fn posix_shell_invocation() {
        let runner = ShellRunner::new(Platform::Posix);
        let cmd = runner.shell_command("npm run dev");
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "sh");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, ["-c", "npm run dev"]);
    }

    #[test]
    fn windows_shell_invocation() {
        let runner = ShellRunner::new(Platform::Windows);
        let cmd = runner.shell_command("notepad src\\config.ts");
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "cmd");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, ["/C", "notepad src\\config.ts"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn zero_exit_is_success() {
        let runner = ShellRunner::new(Platform::Posix);
        assert_eq!(runner.run("true").await, CommandOutcome::Success);
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn nonzero_exit_is_reported_with_status() {
        let runner = ShellRunner::new(Platform::Posix);
        match runner.run("exit 3").await {
            CommandOutcome::Failed(reason) => assert!(reason.contains('3'), "reason: {}", reason),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn best_effort_chain_succeeds_when_fallback_succeeds() {
        let runner = ShellRunner::new(Platform::Posix);
        let outcome = runner.run("false || true").await;
        assert_eq!(outcome, CommandOutcome::Success);
    }

    #[test]
    fn report_lines() {
        assert_eq!(CommandOutcome::Success.report_line(), None);
        assert_eq!(
            CommandOutcome::Failed("exit status: 3".to_string()).report_line(),
            Some("Error: command failed - exit status: 3".to_string())
        );
        assert_eq!(
            CommandOutcome::Interrupted.report_line(),
            Some("Command interrupted".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn sigint_exit_status_is_an_interrupt() {
        use std::os::unix::process::ExitStatusExt;

        // Raw wait status 2: terminated by signal 2, no core dump.
        let killed = ExitStatus::from_raw(SIGINT);
        assert_eq!(CommandOutcome::from_status(killed), CommandOutcome::Interrupted);

        // Exit code 2 is an ordinary failure.
        let exited = ExitStatus::from_raw(2 << 8);
        assert_eq!(
            CommandOutcome::from_status(exited),
            CommandOutcome::Failed("exit status: 2".to_string())
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn failed_command_report_names_the_status() {
        let runner = ShellRunner::new(Platform::Posix);
        let outcome = runner.run("exit 3").await;
        assert_eq!(
            outcome.report_line(),
            Some("Error: command failed - exit status: 3".to_string())
        );
    }

    #[tokio::test]
    async fn missing_shell_is_a_failure_not_an_error() {
        let runner = ShellRunner::with_shell("/nonexistent/site-menu-shell", "-c");
        match runner.run("true").await {
            CommandOutcome::Failed(reason) => assert!(!reason.is_empty()),
            other => panic!("expected spawn failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn ctrl_c_during_command_is_always_interrupted() {
        let runner = ShellRunner::new(Platform::Posix);
        // The shell signals this test process (as the terminal would) and then itself.
        for attempt in 0..20 {
            let outcome = runner.run("kill -INT $PPID; kill -INT $$; sleep 2").await;
            assert_eq!(outcome, CommandOutcome::Interrupted, "attempt {}", attempt);
            assert_eq!(outcome.report_line(), Some("Command interrupted".to_string()));
        }
        // Let the signal driver drain any late SIGINT before the next serial test.
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    }
}
