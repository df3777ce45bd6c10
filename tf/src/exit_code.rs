// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::Display;

/// Outcome of `terraform plan -detailed-exitcode`, per terraform's detailed exit code
/// convention:
///
/// | Code | Meaning                                      |
/// |------|----------------------------------------------|
/// | 0    | Succeeded, no changes required               |
/// | 1    | Errored (eg: required variables are missing) |
/// | 2    | Succeeded, changes are pending               |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PlanExitCode {
    NoChanges,
    Error,
    ChangesPresent,
}

/// Raised when the subprocess exit code falls outside the detailed exit code
/// convention.
#[derive(Debug, thiserror::Error)]
pub enum ExitCodeError {
    #[error("plan exit code {0} is outside the detailed exit code convention (0, 1, 2)")]
    OutOfRange(i32),
    #[error("plan process was terminated by a signal before producing an exit code")]
    KilledBySignal,
}

impl PlanExitCode {
    /// Map a raw process exit code onto the convention.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not 0, 1, or 2, or if the process was killed by
    /// a signal (no code at all).
    pub fn try_from_status_code(code: Option<i32>) -> Result<Self, ExitCodeError> {
        match code {
            Some(0) => Ok(PlanExitCode::NoChanges),
            Some(1) => Ok(PlanExitCode::Error),
            Some(2) => Ok(PlanExitCode::ChangesPresent),
            Some(other) => Err(ExitCodeError::OutOfRange(other)),
            None => Err(ExitCodeError::KilledBySignal),
        }
    }

    /// The raw code this variant corresponds to.
    #[must_use]
    pub fn as_raw(self) -> i32 {
        match self {
            PlanExitCode::NoChanges => 0,
            PlanExitCode::Error => 1,
            PlanExitCode::ChangesPresent => 2,
        }
    }
}

#[cfg(test)]
mod tests_exit_code {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0, PlanExitCode::NoChanges; "zero is no changes")]
    #[test_case(1, PlanExitCode::Error; "one is error")]
    #[test_case(2, PlanExitCode::ChangesPresent; "two is changes present")]
    fn test_known_codes(raw: i32, expected: PlanExitCode) {
        let code = PlanExitCode::try_from_status_code(Some(raw)).unwrap();
        assert_eq!(code, expected);
        assert_eq!(code.as_raw(), raw);
    }

    #[test]
    fn test_out_of_range_code() {
        let result = PlanExitCode::try_from_status_code(Some(127));
        assert!(matches!(result, Err(ExitCodeError::OutOfRange(127))));
    }

    #[test]
    fn test_killed_by_signal() {
        let result = PlanExitCode::try_from_status_code(None);
        assert!(matches!(result, Err(ExitCodeError::KilledBySignal)));
    }
}
