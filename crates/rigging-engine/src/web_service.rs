//! Fixed-shape web service: a Deployment behind a Service

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use rigging_core::{WebServiceEntry, to_dns_label};
use std::collections::BTreeMap;

use crate::chart::Chart;
use crate::resource::Resource;

/// Label key selecting web service pods
pub const APP_LABEL: &str = "app";

/// Web service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebServiceProps {
    /// Container image
    pub image: String,
    /// Number of replicas (default: 1)
    pub replicas: i32,
    /// Port the Service listens on (default: 80)
    pub port: i32,
    /// Port the container listens on (default: 8080)
    pub container_port: i32,
    /// Service type (default: ClusterIP)
    pub service_type: String,
}

impl WebServiceProps {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            replicas: 1,
            port: 80,
            container_port: 8080,
            service_type: "ClusterIP".to_string(),
        }
    }

    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    pub fn with_container_port(mut self, port: i32) -> Self {
        self.container_port = port;
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }
}

impl From<&WebServiceEntry> for WebServiceProps {
    fn from(entry: &WebServiceEntry) -> Self {
        let defaults = Self::new(entry.image.as_str());
        Self {
            replicas: entry.replicas.unwrap_or(defaults.replicas),
            port: entry.port.unwrap_or(defaults.port),
            container_port: entry.container_port.unwrap_or(defaults.container_port),
            service_type: entry
                .service_type
                .clone()
                .unwrap_or(defaults.service_type.clone()),
            ..defaults
        }
    }
}

/// Build the Service and Deployment of a web service under `chart/id`.
///
/// Pods are labelled `app: <dns label of chart/id>`; resource names are
/// derived from the same path.
pub fn synthesize(
    chart_id: &str,
    id: &str,
    namespace: Option<&str>,
    props: &WebServiceProps,
) -> [Resource; 2] {
    let labels = BTreeMap::from([(APP_LABEL.to_string(), to_dns_label(&[chart_id, id]))]);
    let metadata = |suffix: &str| ObjectMeta {
        name: Some(to_dns_label(&[chart_id, id, suffix])),
        namespace: namespace.map(str::to_string),
        ..Default::default()
    };

    let service = Service {
        metadata: metadata("service"),
        spec: Some(ServiceSpec {
            type_: Some(props.service_type.clone()),
            ports: Some(vec![ServicePort {
                port: props.port,
                target_port: Some(IntOrString::Int(props.container_port)),
                ..Default::default()
            }]),
            selector: Some(labels.clone()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let deployment = Deployment {
        metadata: metadata("deployment"),
        spec: Some(DeploymentSpec {
            replicas: Some(props.replicas),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: "app".to_string(),
                        image: Some(props.image.clone()),
                        ports: Some(vec![ContainerPort {
                            container_port: props.container_port,
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    };

    [Resource::Service(service), Resource::Deployment(deployment)]
}

impl Chart {
    /// Register a web service: Service first, then Deployment
    pub fn add_web_service(&mut self, id: &str, props: &WebServiceProps) -> &[Resource] {
        let start = self.len();
        let resources = synthesize(self.id(), id, self.namespace(), props);
        for resource in resources {
            self.add_resource(resource);
        }
        &self.resources()[start..]
    }
}
