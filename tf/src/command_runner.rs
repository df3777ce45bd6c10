// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ok;
use miette::{Context, IntoDiagnostic};
use std::{path::Path, process::Stdio};

/// Disambiguate the [`tokio::process::Command`] type from the [`std::process::Command`]
/// type. tokio's `Command` is asynchronous and doesn't block the thread; its methods
/// return futures that must be awaited, and it integrates with the tokio runtime so
/// subprocess completion can be awaited alongside other async work.
pub type TokioCommand = tokio::process::Command;

/// This macro creates a [`TokioCommand`] that receives a set of arguments and
/// returns it.
///
/// # Example of command and args
///
/// ```
/// # use r3bl_tf::command;
/// # use r3bl_tf::TokioCommand;
///
/// async fn run_command() {
///     let arg_2 = "world!";
///     let mut command = command!(
///         program => "echo",
///         args => "Hello,", arg_2,
///     );
///     let output = command.output().await.expect("Failed to execute command");
///     assert!(output.status.success());
/// }
/// ```
///
/// # Example of command, args, and a runtime-built list of extra args
///
/// ```
/// # use r3bl_tf::command;
///
/// async fn run_command() {
///     let var_args = vec!["-var".to_string(), "region=\"us-central1\"".to_string()];
///     let mut command = command!(
///         program => "terraform",
///         args => "plan", "-input=false",
///         + items => var_args
///     );
///     let output = command.output().await.expect("Failed to execute command");
/// }
/// ```
#[macro_export]
macro_rules! command {
    // Variant that receives a command and args & items.
    (program=> $cmd:expr, args => $($args:expr,)* + items => $items:expr)
    => {{
        let mut it = $crate::TokioCommand::new($cmd);
        $(
            it.arg($args);
        )*
        for item in $items {
            it.arg(item);
        }
        it
    }};

    // Variant that receives a command and args.
    (program=> $cmd:expr, args=> $($args:expr),* $(,)?) => {{
        let mut it = $crate::TokioCommand::new($cmd);
        $(
            it.arg($args);
        )*
        it
    }};
}

/// Everything captured from one completed subprocess invocation. Unlike [`run()`],
/// holding on to the raw status code lets callers interpret conventions like
/// terraform's `-detailed-exitcode` where a non-zero code is meaningful, not an error.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Raw process exit code. `None` when the process was killed by a signal.
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool { self.status_code == Some(0) }

    /// Stdout and stderr concatenated, for pattern matching against provider error
    /// output that terraform splits across both streams.
    #[must_use]
    pub fn combined(&self) -> String { format!("{}{}", self.stdout, self.stderr) }
}

#[macro_export]
macro_rules! bail_command_ran_and_failed {
    ($command:expr, $output:expr) => {
        miette::bail!(
            "command failed\n[command]: '{cmd:?}'\n[status]: '{status:?}'\n[stderr]: '{stderr}'",
            cmd = $command,
            status = $output.status_code,
            stderr = $output.stderr,
        );
    };
}

/// Run the command to completion in `current_dir` and capture its output. The command
/// is not allowed to have user interaction; it does not inherit `stdin`, `stdout`,
/// `stderr` from the parent process.
///
/// A non-zero exit code is NOT an error here. The only error is failing to spawn or
/// wait on the process (eg: the program does not exist).
///
/// # Errors
///
/// Returns an error if:
/// - The command program does not exist or cannot be executed
/// - I/O errors occur during command execution
pub async fn run_capture(
    command: &mut TokioCommand,
    current_dir: &Path,
) -> miette::Result<CommandOutput> {
    let output = command
        .current_dir(current_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .into_diagnostic()
        .wrap_err(miette::miette!("Unable to run command: {:?}", command))?;

    ok!(CommandOutput {
        status_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Like [`run_capture()`], but a non-zero exit code is an error. Returns the captured
/// stdout on success.
///
/// # Errors
///
/// Returns an error if:
/// - The command program does not exist or cannot be executed
/// - The command fails with a non-zero exit status
/// - I/O errors occur during command execution
pub async fn run(
    command: &mut TokioCommand,
    current_dir: &Path,
) -> miette::Result<String> {
    let output = run_capture(command, current_dir).await?;
    if output.success() {
        ok!(output.stdout)
    } else {
        bail_command_ran_and_failed!(command, output);
    }
}

#[cfg(test)]
mod tests_command_runner {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn cwd() -> PathBuf { std::env::current_dir().unwrap() }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run() {
        let output = run(
            &mut command!(
                program => "echo",
                args => "Hello, world!",
            ),
            &cwd(),
        )
        .await
        .unwrap();
        assert_eq!(output, "Hello, world!\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_capture_nonzero_exit_is_not_an_error() {
        let output = run_capture(
            &mut command!(
                program => "sh",
                args => "-c", "echo out; echo err >&2; exit 3",
            ),
            &cwd(),
        )
        .await
        .unwrap();
        assert_eq!(output.status_code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert_eq!(output.combined(), "out\nerr\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_nonzero_exit_is_an_error() {
        let result = run(
            &mut command!(
                program => "sh",
                args => "-c", "exit 1",
            ),
            &cwd(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_invalid_command() {
        let result = run_capture(
            &mut command!(
                program => "does_not_exist",
                args => "Hello, world!",
            ),
            &cwd(),
        )
        .await;
        if let Err(err) = result {
            assert!(err.to_string().contains("does_not_exist"));
        } else {
            panic!("Expected an error, but got success");
        }
    }

    #[tokio::test]
    async fn test_command_with_list_of_args() {
        let extra = vec!["-var".to_string(), "region=\"us-central1\"".to_string()];
        let cmd = command!(
            program => "terraform",
            args => "plan",
            + items => extra
        );
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args, ["plan", "-var", "region=\"us-central1\""]);
    }
}
