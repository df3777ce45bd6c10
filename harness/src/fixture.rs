// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The sample endpoint configuration used by the validation scenarios.
//!
//! Four records covering every producer target mechanism the module supports: two
//! Cloud SQL instances (one with a static IP, one dynamically allocated), one generic
//! service attachment target, and one AlloyDB instance.

use crate::{PscEndpoint, ProducerTarget};
use serde_json::Value;

const ENDPOINT_PROJECT_ID: &str = "endpoint-project-id";
const PRODUCER_INSTANCE_PROJECT_ID: &str = "producer-instance-project-id";

/// The shared variable name the module declares for its endpoint list.
pub const PSC_ENDPOINTS_VAR: &str = "psc_endpoints";

#[must_use]
pub fn sample_endpoints() -> Vec<PscEndpoint> {
    vec![
        PscEndpoint {
            endpoint_project_id: ENDPOINT_PROJECT_ID.to_string(),
            producer_instance_project_id: PRODUCER_INSTANCE_PROJECT_ID.to_string(),
            subnetwork_name: "default".to_string(),
            network_name: "default".to_string(),
            ip_address_literal: Some("10.128.0.5".to_string()),
            region: "us-central1".to_string(),
            producer: ProducerTarget::cloudsql("sql"),
        },
        PscEndpoint {
            endpoint_project_id: ENDPOINT_PROJECT_ID.to_string(),
            producer_instance_project_id: PRODUCER_INSTANCE_PROJECT_ID.to_string(),
            subnetwork_name: "default".to_string(),
            network_name: "default".to_string(),
            ip_address_literal: None,
            region: "us-central1".to_string(),
            producer: ProducerTarget::cloudsql("sql-1"),
        },
        PscEndpoint {
            endpoint_project_id: ENDPOINT_PROJECT_ID.to_string(),
            producer_instance_project_id: PRODUCER_INSTANCE_PROJECT_ID.to_string(),
            subnetwork_name: "subnetwork".to_string(),
            network_name: "network".to_string(),
            ip_address_literal: None,
            region: "us-central1".to_string(),
            producer: ProducerTarget::service_attachment(
                "projects/xxx-tp/regions/xx-central1/serviceAttachments/gkedpm-xxx",
            ),
        },
        PscEndpoint {
            endpoint_project_id: ENDPOINT_PROJECT_ID.to_string(),
            producer_instance_project_id: PRODUCER_INSTANCE_PROJECT_ID.to_string(),
            subnetwork_name: "alloydb-subnet-1".to_string(),
            network_name: "alloydb-vpc".to_string(),
            ip_address_literal: None,
            region: "us-central1".to_string(),
            producer: ProducerTarget::alloydb("alloydb-id", "alloydb-cid"),
        },
    ]
}

/// The variable map for the module under test: the sample records wrapped under
/// [`PSC_ENDPOINTS_VAR`], ready for [`r3bl_tf::TerraformOptions::with_vars`].
///
/// # Panics
///
/// Panics if the records fail to serialize, which cannot happen for the static
/// fixture.
#[must_use]
pub fn tf_vars() -> serde_json::Map<String, Value> {
    let endpoints =
        serde_json::to_value(sample_endpoints()).expect("fixture always serializes");
    let mut vars = serde_json::Map::new();
    vars.insert(PSC_ENDPOINTS_VAR.to_string(), endpoints);
    vars
}

#[cfg(test)]
mod tests_fixture {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRODUCER_KEYS: [&str; 3] = ["target", "producer_cloudsql", "producer_alloydb"];

    #[test]
    fn test_fixture_has_four_records() {
        assert_eq!(sample_endpoints().len(), 4);
    }

    #[test]
    fn test_each_record_has_exactly_one_producer_mechanism() {
        for endpoint in sample_endpoints() {
            let value = serde_json::to_value(&endpoint).unwrap();
            let object = value.as_object().unwrap();
            let producer_key_count = PRODUCER_KEYS
                .iter()
                .filter(|key| object.contains_key(**key))
                .count();
            assert_eq!(producer_key_count, 1, "offending record: {value}");
        }
    }

    #[test]
    fn test_only_first_record_has_static_ip() {
        let endpoints = sample_endpoints();
        assert_eq!(
            endpoints[0].ip_address_literal.as_deref(),
            Some("10.128.0.5")
        );
        assert!(endpoints[1..].iter().all(|e| e.ip_address_literal.is_none()));
    }

    #[test]
    fn test_tf_vars_wraps_records_under_psc_endpoints() {
        let vars = tf_vars();
        assert_eq!(vars.len(), 1);
        let records = vars[PSC_ENDPOINTS_VAR].as_array().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["region"], "us-central1");
    }
}
