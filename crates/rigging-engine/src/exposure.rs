//! Exposure resolver: the network-facing resource of a workload

use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use rigging_core::{ContainerSpec, ExposeKind, WorkloadKind, WorkloadSpec};

use crate::error::{EngineError, Result};
use crate::pod_template::selector_labels;

/// Decide whether the workload needs a Service and build it.
///
/// StatefulSets always get one because their `serviceName` must resolve.
/// Reserved exposure kinds fail instead of being skipped.
pub fn resolve(spec: &WorkloadSpec) -> Result<Option<Service>> {
    match (spec.expose, spec.kind) {
        (Some(ExposeKind::Service), _) | (None, WorkloadKind::StatefulSet) => {
            Ok(Some(service(spec)))
        }
        (Some(kind @ (ExposeKind::Ingress | ExposeKind::ReverseProxy)), _) => {
            Err(EngineError::ExposureNotImplemented {
                workload: spec.name.clone(),
                kind,
            })
        }
        (None, _) => Ok(None),
    }
}

/// Every declared container port, container by container, in declaration order
pub fn service_ports(containers: &[ContainerSpec]) -> Vec<ServicePort> {
    containers
        .iter()
        .flat_map(|c| c.ports.iter())
        .map(|p| ServicePort {
            name: p.name.clone(),
            protocol: p.protocol.map(|proto| proto.as_str().to_string()),
            port: p.number,
            ..Default::default()
        })
        .collect()
}

fn service(spec: &WorkloadSpec) -> Service {
    let ports = service_ports(&spec.containers);

    Service {
        metadata: ObjectMeta {
            name: Some(spec.name.clone()),
            namespace: spec.namespace.clone(),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(selector_labels(&spec.name)),
            ports: if ports.is_empty() { None } else { Some(ports) },
            ..Default::default()
        }),
        ..Default::default()
    }
}
