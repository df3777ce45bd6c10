// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Typed PSC endpoint records.
//!
//! These mirror the `psc_endpoints` variable schema of the producer connectivity
//! module. Each record places a consumer-side endpoint in a network/subnetwork and
//! names exactly one producer target mechanism. The original module only enforces the
//! exactly-one rule at plan time; here the enum makes the invalid shapes
//! unrepresentable before terraform ever runs.

use serde::{Deserialize, Serialize};

/// One consumer endpoint connecting to a producer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PscEndpoint {
    /// Project owning the consumer endpoint.
    pub endpoint_project_id: String,
    /// Project owning the producer resource.
    pub producer_instance_project_id: String,
    pub subnetwork_name: String,
    pub network_name: String,
    /// Optional static IP. Serialized as `null` when absent (the key is always
    /// present, matching the module schema), in which case an address is allocated
    /// dynamically.
    pub ip_address_literal: Option<String>,
    pub region: String,
    /// Exactly one producer target mechanism. Flattened so the record carries a single
    /// `target` / `producer_cloudsql` / `producer_alloydb` key on the wire.
    #[serde(flatten)]
    pub producer: ProducerTarget,
}

/// The producer side of a PSC connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerTarget {
    /// Fully-qualified service attachment resource name, for generic producer
    /// services (eg: `projects/p/regions/r/serviceAttachments/sa`).
    Target(String),
    /// Managed relational database instance (Cloud SQL).
    ProducerCloudsql(CloudSqlInstance),
    /// Managed distributed SQL instance (AlloyDB).
    ProducerAlloydb(AlloyDbInstance),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudSqlInstance {
    pub instance_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlloyDbInstance {
    pub instance_name: String,
    pub cluster_id: String,
}

impl ProducerTarget {
    #[must_use]
    pub fn service_attachment(target: impl Into<String>) -> Self {
        ProducerTarget::Target(target.into())
    }

    #[must_use]
    pub fn cloudsql(instance_name: impl Into<String>) -> Self {
        ProducerTarget::ProducerCloudsql(CloudSqlInstance {
            instance_name: instance_name.into(),
        })
    }

    #[must_use]
    pub fn alloydb(
        instance_name: impl Into<String>,
        cluster_id: impl Into<String>,
    ) -> Self {
        ProducerTarget::ProducerAlloydb(AlloyDbInstance {
            instance_name: instance_name.into(),
            cluster_id: cluster_id.into(),
        })
    }
}
