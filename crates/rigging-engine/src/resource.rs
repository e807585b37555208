//! Synthesized resource documents

use k8s_openapi::Resource as _;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;

use crate::error::Result;

/// One Kubernetes document, tagged by kind
///
/// Serializes as the wrapped object, `apiVersion` and `kind` included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Pod(Pod),
    ReplicaSet(ReplicaSet),
    Deployment(Deployment),
    StatefulSet(StatefulSet),
    DaemonSet(DaemonSet),
    Job(Job),
    CronJob(CronJob),
    Service(Service),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pod(_) => Pod::KIND,
            Self::ReplicaSet(_) => ReplicaSet::KIND,
            Self::Deployment(_) => Deployment::KIND,
            Self::StatefulSet(_) => StatefulSet::KIND,
            Self::DaemonSet(_) => DaemonSet::KIND,
            Self::Job(_) => Job::KIND,
            Self::CronJob(_) => CronJob::KIND,
            Self::Service(_) => Service::KIND,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::Pod(r) => &r.metadata,
            Self::ReplicaSet(r) => &r.metadata,
            Self::Deployment(r) => &r.metadata,
            Self::StatefulSet(r) => &r.metadata,
            Self::DaemonSet(r) => &r.metadata,
            Self::Job(r) => &r.metadata,
            Self::CronJob(r) => &r.metadata,
            Self::Service(r) => &r.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or("unnamed")
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }

    /// Display name for logging: `namespace/Kind/name` or `Kind/name`
    pub fn display_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}/{}", ns, self.kind(), self.name()),
            None => format!("{}/{}", self.kind(), self.name()),
        }
    }

    /// Render as a single YAML document
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_service(ns: Option<&str>) -> Resource {
        Resource::Service(Service {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                namespace: ns.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_kind_and_names() {
        let svc = named_service(Some("media"));
        assert_eq!(svc.kind(), "Service");
        assert_eq!(svc.name(), "web");
        assert_eq!(svc.namespace(), Some("media"));
        assert_eq!(svc.display_name(), "media/Service/web");
        assert_eq!(named_service(None).display_name(), "Service/web");
    }

    #[test]
    fn test_serializes_type_meta() {
        let json = named_service(None).to_json_value().unwrap();
        assert_eq!(json["apiVersion"], "v1");
        assert_eq!(json["kind"], "Service");
        assert_eq!(json["metadata"]["name"], "web");

        let yaml = Resource::Deployment(Deployment::default()).to_yaml().unwrap();
        assert!(yaml.contains("apiVersion: apps/v1"));
        assert!(yaml.contains("kind: Deployment"));
    }
}
