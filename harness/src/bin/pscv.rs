// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `pscv`: run the producer connectivity validation scenarios from the command line.
//!
//! Runs `terraform init` + `validate` against the module directory, then confirms the
//! module refuses to `plan` when the required `psc_endpoints` variable is missing
//! (detailed exit code 1).

use clap::Parser;
use miette::miette;
use r3bl_psc_harness::fixture;
use r3bl_tf::{PlanExitCode, TerraformOptions, init_and_validate, plan_exit_code};
use std::{path::PathBuf, process};

/// The bundled fixture module, anchored to this crate so the default works no matter
/// which directory the binary is launched from (workspace root, crate dir, etc).
fn default_module_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/producer_connectivity")
}

#[derive(Debug, Parser)]
#[command(
    name = "pscv",
    about = "Validate the PSC producer connectivity Terraform module",
    long_about = "Validates a Terraform module directory: initializes and validates it, \
                  then confirms that planning without the required psc_endpoints \
                  variable fails with detailed exit code 1.\n\n\
                  With --sample-plan, additionally plans with the bundled 4-endpoint \
                  sample configuration and reports the detailed exit code.",
    version
)]
pub struct CLIArg {
    /// Terraform module directory to validate.
    #[arg(value_name = "MODULE_DIR", default_value_os_t = default_module_dir())]
    pub module_dir: PathBuf,

    /// Plan artifact path, relative to the module directory.
    #[arg(long, default_value = "terraform.tfplan")]
    pub plan_file: PathBuf,

    /// Also plan with the bundled sample endpoint configuration and report the
    /// detailed exit code. This needs provider credentials.
    #[arg(long)]
    pub sample_plan: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:?}");
        process::exit(1);
    }
}

#[tokio::main]
async fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli_arg = CLIArg::parse();

    let options = TerraformOptions::new(&cli_arg.module_dir)
        .with_no_color(true)
        .with_reconfigure(true)
        .with_lock(true)
        .with_plan_file_path(&cli_arg.plan_file)
        .with_default_retryable_errors();

    tracing::info!(
        message = "validating module",
        dir = %options.terraform_dir.display()
    );
    init_and_validate(&options).await?;
    println!("✓ init and validate: {}", cli_arg.module_dir.display());

    tracing::info!(message = "checking that plan without required variables fails");
    let exit_code = plan_exit_code(&options).await?;
    if exit_code != PlanExitCode::Error {
        return Err(miette!(
            "expected plan without variables to fail with exit code 1, got {} ({})",
            exit_code.as_raw(),
            exit_code,
        ));
    }
    println!("✓ plan without required variables is rejected");

    if cli_arg.sample_plan {
        let options = options.with_vars(fixture::tf_vars());
        let exit_code = plan_exit_code(&options).await?;
        println!(
            "✓ plan with sample endpoints finished: exit code {} ({})",
            exit_code.as_raw(),
            exit_code,
        );
    }

    Ok(())
}
