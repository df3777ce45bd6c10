// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::RetryPolicy;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Everything one terraform invocation needs to know: where the module lives, which
/// binary to run, which input variables to pass, and which CLI behaviors to request.
///
/// Construct with [`TerraformOptions::new`] and chain the `with_*` setters:
///
/// ```
/// use r3bl_tf::TerraformOptions;
/// use serde_json::json;
///
/// let options = TerraformOptions::new("modules/producer_connectivity")
///     .with_no_color(true)
///     .with_reconfigure(true)
///     .with_lock(true)
///     .with_plan_file_path("terraform.tfplan")
///     .with_var("psc_endpoints", json!([]))
///     .with_default_retryable_errors();
/// ```
#[derive(Debug, Clone)]
pub struct TerraformOptions {
    /// Directory containing the module under test. All subcommands run with this as
    /// their working directory.
    pub terraform_dir: PathBuf,
    /// Program to invoke. Overridable so tests can point at a stub.
    pub terraform_binary: String,
    /// Input variables, passed as `-var key=<expr>` arguments.
    pub vars: serde_json::Map<String, Value>,
    /// Pass `-no-color` to every subcommand.
    pub no_color: bool,
    /// Pass `-reconfigure` to `init`.
    pub reconfigure: bool,
    /// Pass `-lock=<bool>` to `plan`. Defaults to true; terraform's own state locking
    /// is what guards the shared module directory.
    pub lock: bool,
    /// When set, `plan` writes its artifact via `-out=<path>` (relative paths resolve
    /// inside `terraform_dir`).
    pub plan_file_path: Option<PathBuf>,
    /// Retry behavior for transient provider errors.
    pub retry: RetryPolicy,
}

impl TerraformOptions {
    #[must_use]
    pub fn new(terraform_dir: impl AsRef<Path>) -> Self {
        Self {
            terraform_dir: terraform_dir.as_ref().to_path_buf(),
            terraform_binary: "terraform".to_string(),
            vars: serde_json::Map::new(),
            no_color: false,
            reconfigure: false,
            lock: true,
            plan_file_path: None,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_terraform_binary(mut self, binary: impl Into<String>) -> Self {
        self.terraform_binary = binary.into();
        self
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: Value) -> Self {
        self.vars.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_vars(mut self, vars: serde_json::Map<String, Value>) -> Self {
        self.vars = vars;
        self
    }

    #[must_use]
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    #[must_use]
    pub fn with_reconfigure(mut self, reconfigure: bool) -> Self {
        self.reconfigure = reconfigure;
        self
    }

    #[must_use]
    pub fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    #[must_use]
    pub fn with_plan_file_path(mut self, path: impl AsRef<Path>) -> Self {
        self.plan_file_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Install [`crate::DEFAULT_RETRYABLE_ERRORS`] as the retry pattern list. This is
    /// the equivalent of opting in to the well-known transient provider errors.
    #[must_use]
    pub fn with_default_retryable_errors(mut self) -> Self {
        self.retry = RetryPolicy::with_default_retryable_errors();
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests_options {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = TerraformOptions::new("some/module");
        assert_eq!(options.terraform_binary, "terraform");
        assert!(options.vars.is_empty());
        assert!(!options.no_color);
        assert!(!options.reconfigure);
        assert!(options.lock);
        assert!(options.plan_file_path.is_none());
        assert!(options.retry.retryable_error_patterns.is_empty());
    }

    #[test]
    fn test_chained_setters() {
        let options = TerraformOptions::new("some/module")
            .with_terraform_binary("tofu")
            .with_no_color(true)
            .with_reconfigure(true)
            .with_lock(false)
            .with_plan_file_path("terraform.tfplan")
            .with_var("region", json!("us-central1"))
            .with_default_retryable_errors();
        assert_eq!(options.terraform_binary, "tofu");
        assert!(options.no_color);
        assert!(options.reconfigure);
        assert!(!options.lock);
        assert_eq!(
            options.plan_file_path,
            Some(PathBuf::from("terraform.tfplan"))
        );
        assert_eq!(options.vars["region"], json!("us-central1"));
        assert!(!options.retry.retryable_error_patterns.is_empty());
    }
}
