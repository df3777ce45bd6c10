// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The terraform subcommands the driver knows how to run.
//!
//! Every operation is an async fn that runs one or more subprocess invocations to
//! completion in the module directory from [`TerraformOptions`]. Failures carry the
//! captured stderr in the error report. Invocations whose output matches a retryable
//! pattern are re-run per the options' [`crate::RetryPolicy`].

use crate::{CommandOutput, PlanExitCode, TF_MOD_DEBUG, TerraformOptions, command, ok,
            run_capture, var_args};
use miette::IntoDiagnostic;

fn init_args(options: &TerraformOptions) -> Vec<String> {
    let mut args = vec!["init".to_string(), "-input=false".to_string()];
    if options.reconfigure {
        args.push("-reconfigure".to_string());
    }
    if options.no_color {
        args.push("-no-color".to_string());
    }
    args
}

fn validate_args(options: &TerraformOptions) -> Vec<String> {
    let mut args = vec!["validate".to_string()];
    if options.no_color {
        args.push("-no-color".to_string());
    }
    args
}

fn plan_args(options: &TerraformOptions) -> Vec<String> {
    let mut args = vec![
        "plan".to_string(),
        "-input=false".to_string(),
        "-detailed-exitcode".to_string(),
        format!("-lock={}", options.lock),
    ];
    if let Some(plan_file_path) = &options.plan_file_path {
        args.push(format!("-out={}", plan_file_path.display()));
    }
    if options.no_color {
        args.push("-no-color".to_string());
    }
    args.extend(var_args(&options.vars));
    args
}

/// Run one subcommand to completion, re-running it when the combined output of a
/// failed attempt matches a retryable pattern. Returns the final attempt's captured
/// output; interpreting the exit code is the caller's business.
async fn run_with_retry(
    options: &TerraformOptions,
    args: &[String],
) -> miette::Result<CommandOutput> {
    let mut attempt: usize = 0;
    loop {
        let mut cmd = command!(
            program => &options.terraform_binary,
            args => + items => args.iter()
        );
        let output = run_capture(&mut cmd, &options.terraform_dir).await?;

        if output.success() || attempt >= options.retry.max_retries {
            return ok!(output);
        }

        let Some(pattern) = options.retry.find_retryable_match(&output.combined())
        else {
            return ok!(output);
        };

        attempt += 1;
        tracing::warn!(
            message = "terraform output matched a retryable error, re-running",
            subcommand = %args[0],
            pattern = %pattern,
            attempt = %attempt,
        );
        tokio::time::sleep(options.retry.time_between_retries).await;
    }
}

/// Run `terraform init` against the module directory.
///
/// # Errors
///
/// Returns an error if the binary cannot be spawned or init exits non-zero (the
/// captured stderr is included in the report).
pub async fn init(options: &TerraformOptions) -> miette::Result<String> {
    tracing::info!(
        message = "terraform init",
        dir = %options.terraform_dir.display()
    );
    let output = run_with_retry(options, &init_args(options)).await?;
    if output.success() {
        ok!(output.stdout)
    } else {
        miette::bail!("terraform init failed: {}", output.stderr);
    }
}

/// Run `terraform validate` against the module directory.
///
/// # Errors
///
/// Returns an error if the binary cannot be spawned or validate exits non-zero.
pub async fn validate(options: &TerraformOptions) -> miette::Result<String> {
    tracing::info!(
        message = "terraform validate",
        dir = %options.terraform_dir.display()
    );
    let output = run_with_retry(options, &validate_args(options)).await?;
    if output.success() {
        ok!(output.stdout)
    } else {
        miette::bail!("terraform validate failed: {}", output.stderr);
    }
}

/// Run `terraform init` followed by `terraform validate`. Returns the concatenated
/// stdout of both subcommands. Running this twice in a row is safe; init and validate
/// only touch terraform's own cache directory.
///
/// # Errors
///
/// Returns an error if either subcommand fails.
pub async fn init_and_validate(options: &TerraformOptions) -> miette::Result<String> {
    let init_stdout = init(options).await?;
    let validate_stdout = validate(options).await?;
    ok!(format!("{init_stdout}{validate_stdout}"))
}

/// Run `terraform plan -detailed-exitcode` and return the typed exit code. Exit code 1
/// is a legitimate return value here (that is how a module reports missing required
/// variables), not an `Err`.
///
/// # Errors
///
/// Returns an error if the binary cannot be spawned, or if the process exits with a
/// code outside the detailed exit code convention.
pub async fn plan_exit_code(
    options: &TerraformOptions,
) -> miette::Result<PlanExitCode> {
    tracing::info!(
        message = "terraform plan",
        dir = %options.terraform_dir.display(),
        var_count = %options.vars.len(),
    );
    let output = run_with_retry(options, &plan_args(options)).await?;
    let exit_code =
        PlanExitCode::try_from_status_code(output.status_code).into_diagnostic()?;
    TF_MOD_DEBUG.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "terraform plan finished",
            exit_code = %exit_code,
            stderr = %output.stderr,
        );
    });
    ok!(exit_code)
}

#[cfg(test)]
mod tests_args {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_init_args_defaults() {
        let options = TerraformOptions::new("mod");
        assert_eq!(init_args(&options), ["init", "-input=false"]);
    }

    #[test]
    fn test_init_args_with_reconfigure_and_no_color() {
        let options = TerraformOptions::new("mod")
            .with_reconfigure(true)
            .with_no_color(true);
        assert_eq!(
            init_args(&options),
            ["init", "-input=false", "-reconfigure", "-no-color"]
        );
    }

    #[test]
    fn test_validate_args() {
        let options = TerraformOptions::new("mod").with_no_color(true);
        assert_eq!(validate_args(&options), ["validate", "-no-color"]);
    }

    #[test]
    fn test_plan_args_without_vars() {
        let options = TerraformOptions::new("mod")
            .with_no_color(true)
            .with_plan_file_path("terraform.tfplan");
        assert_eq!(
            plan_args(&options),
            [
                "plan",
                "-input=false",
                "-detailed-exitcode",
                "-lock=true",
                "-out=terraform.tfplan",
                "-no-color",
            ]
        );
    }

    #[test]
    fn test_plan_args_with_vars_and_lock_disabled() {
        let options = TerraformOptions::new("mod")
            .with_lock(false)
            .with_var("psc_endpoints", json!([]));
        assert_eq!(
            plan_args(&options),
            [
                "plan",
                "-input=false",
                "-detailed-exitcode",
                "-lock=false",
                "-var",
                "psc_endpoints=[]",
            ]
        );
    }
}
