// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

//! # r3bl-psc-harness
//!
//! Validation harness for the Private Service Connect (PSC) producer connectivity
//! Terraform module. Two collaborating pieces:
//!
//! - **Configuration builder** ([`endpoint`], [`fixture`]): typed endpoint records
//!   mirroring the module's `psc_endpoints` variable schema, plus the 4-record sample
//!   configuration covering Cloud SQL, AlloyDB, and generic service attachment
//!   producers.
//! - **Validation scenarios** (the `pscv` bin and the tests in `tests/`): drive
//!   `terraform init`/`validate`/`plan` via [`r3bl_tf`] and assert that a valid module
//!   initializes cleanly and that planning without the required variables is rejected
//!   with detailed exit code 1.
//!
//! The bundled module fixture lives in `fixtures/producer_connectivity/`.

pub mod endpoint;
pub mod fixture;

// Re-export.
pub use endpoint::*;
pub use fixture::*;
