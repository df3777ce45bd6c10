// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

//! # r3bl_tf
//!
//! Rust support for driving the `terraform` CLI as a subprocess. This crate exists so
//! that infrastructure modules can be validated from Rust test suites and small CLI
//! tools, without shelling out by hand in every test.
//!
//! ## Features
//!
//! - **Init / validate**: run `terraform init` and `terraform validate` against a
//!   module directory, with `-reconfigure` and `-no-color` support.
//! - **Plan with detailed exit code**: run `terraform plan -detailed-exitcode` and get
//!   back a typed [`PlanExitCode`] distinguishing "no changes" (0), "error" (1), and
//!   "changes present" (2).
//! - **Typed input variables**: pass a [`serde_json`] variable map; each entry is
//!   encoded as a `-var key=<expr>` argument (JSON literals are valid Terraform
//!   expression syntax).
//! - **Transient error retry**: opt in to a default list of known-transient provider
//!   error patterns (registry timeouts, TLS handshake failures, etc.) and have failing
//!   invocations retried automatically.
//!
//! ## Example
//!
//! ```no_run
//! use r3bl_tf::{PlanExitCode, TerraformOptions, init_and_validate, plan_exit_code};
//!
//! async fn validate_module() -> miette::Result<()> {
//!     let options = TerraformOptions::new("../modules/networking")
//!         .with_no_color(true)
//!         .with_default_retryable_errors();
//!     init_and_validate(&options).await?;
//!
//!     // A module with required variables must refuse to plan without them.
//!     let exit_code = plan_exit_code(&options).await?;
//!     assert_eq!(exit_code, PlanExitCode::Error);
//!     Ok(())
//! }
//! ```

// Private modules (hide internal structure)
mod command_runner;
mod exit_code;
mod ops;
mod options;
mod retry;
mod vars;

// Re-export.
pub use command_runner::*;
pub use exit_code::*;
pub use ops::*;
pub use options::*;
pub use retry::*;
pub use vars::*;

pub const TF_MOD_DEBUG: bool = true;

/// Reduce boilerplate for `Ok(...)` returns in functions that return a `Result`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
