//! Resource synthesizer: workload kind to Kubernetes documents

use k8s_openapi::api::apps::v1::{
    DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec, ReplicaSet, ReplicaSetSpec,
    StatefulSet, StatefulSetSpec,
};
use k8s_openapi::api::batch::v1::{CronJob, CronJobSpec, Job, JobSpec, JobTemplateSpec};
use k8s_openapi::api::core::v1::{Pod, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use rigging_core::{WorkloadKind, WorkloadSpec};

use crate::error::{EngineError, Result};
use crate::exposure;
use crate::pod_template::{self, label_selector};
use crate::resource::Resource;

/// Documents produced for one workload
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesized {
    /// The resource matching the workload kind
    pub primary: Resource,
    /// Service fronting the workload, when exposed
    pub exposure: Option<Resource>,
}

impl Synthesized {
    /// Primary resource first, then the exposure resource
    pub fn into_resources(self) -> Vec<Resource> {
        let mut resources = Vec::with_capacity(2);
        resources.push(self.primary);
        resources.extend(self.exposure);
        resources
    }
}

/// Turns a finalized [`WorkloadSpec`] into resource documents
pub struct Synthesizer;

impl Synthesizer {
    /// Synthesize the primary resource and the exposure resource together.
    ///
    /// Either both succeed or nothing is returned.
    pub fn synthesize(spec: &WorkloadSpec) -> Result<Synthesized> {
        let primary = Self::workload(spec)?;
        let exposure = exposure::resolve(spec)?.map(Resource::Service);

        tracing::debug!(
            workload = %spec.name,
            kind = %spec.kind,
            exposed = exposure.is_some(),
            "synthesized workload"
        );

        Ok(Synthesized { primary, exposure })
    }

    /// Synthesize only the resource matching the workload kind
    pub fn workload(spec: &WorkloadSpec) -> Result<Resource> {
        if spec.containers.is_empty() {
            return Err(EngineError::MissingContainer {
                workload: spec.name.clone(),
                kind: spec.kind,
            });
        }

        if spec.schedule.is_some() && spec.kind != WorkloadKind::CronJob {
            tracing::warn!(
                workload = %spec.name,
                kind = %spec.kind,
                "schedule is only used by CronJob workloads; ignoring it"
            );
        }
        if spec.replicas.is_some() && !spec.kind.is_scalable() {
            tracing::warn!(
                workload = %spec.name,
                kind = %spec.kind,
                "replicas are not used by this workload kind; ignoring them"
            );
        }

        let metadata = ObjectMeta {
            name: Some(spec.name.clone()),
            namespace: spec.namespace.clone(),
            ..Default::default()
        };
        let template = pod_template::compile(spec);

        let resource = match spec.kind {
            WorkloadKind::Pod => Resource::Pod(Pod {
                metadata: ObjectMeta {
                    labels: template.metadata.and_then(|m| m.labels),
                    ..metadata
                },
                spec: template.spec,
                ..Default::default()
            }),
            WorkloadKind::ReplicaSet => Resource::ReplicaSet(ReplicaSet {
                metadata,
                spec: Some(ReplicaSetSpec {
                    replicas: spec.replicas,
                    selector: label_selector(&spec.name),
                    template: Some(template),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            WorkloadKind::Deployment => Resource::Deployment(Deployment {
                metadata,
                spec: Some(DeploymentSpec {
                    replicas: spec.replicas,
                    selector: label_selector(&spec.name),
                    template,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            WorkloadKind::StatefulSet => Resource::StatefulSet(StatefulSet {
                metadata,
                spec: Some(StatefulSetSpec {
                    replicas: spec.replicas,
                    selector: label_selector(&spec.name),
                    service_name: spec.name.clone().into(),
                    template,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            WorkloadKind::DaemonSet => Resource::DaemonSet(DaemonSet {
                metadata,
                spec: Some(DaemonSetSpec {
                    selector: label_selector(&spec.name),
                    template,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            WorkloadKind::Job => Resource::Job(Job {
                metadata,
                spec: Some(job_spec(template)),
                ..Default::default()
            }),
            WorkloadKind::CronJob => {
                let schedule = spec
                    .schedule
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| EngineError::MissingSchedule {
                        workload: spec.name.clone(),
                    })?;

                Resource::CronJob(CronJob {
                    metadata,
                    spec: Some(CronJobSpec {
                        schedule: schedule.to_string(),
                        job_template: JobTemplateSpec {
                            metadata: None,
                            spec: Some(job_spec(template)),
                        },
                        ..Default::default()
                    }),
                    ..Default::default()
                })
            }
        };

        Ok(resource)
    }
}

fn job_spec(template: PodTemplateSpec) -> JobSpec {
    JobSpec {
        template,
        ..Default::default()
    }
}
