//! Workload model and builder

use std::str::FromStr;

use crate::container::ContainerSpec;
use crate::error::{CoreError, Result, closest_match};
use crate::volume::{MountTarget, Volume, VolumeBinding};

/// The kind of orchestration resource a workload compiles to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Pod,
    ReplicaSet,
    #[default]
    Deployment,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
}

impl WorkloadKind {
    /// Every workload kind, in declaration order
    pub const ALL: [WorkloadKind; 7] = [
        Self::Pod,
        Self::ReplicaSet,
        Self::Deployment,
        Self::StatefulSet,
        Self::DaemonSet,
        Self::Job,
        Self::CronJob,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pod => "Pod",
            Self::ReplicaSet => "ReplicaSet",
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::DaemonSet => "DaemonSet",
            Self::Job => "Job",
            Self::CronJob => "CronJob",
        }
    }

    /// Whether the kind manages pods through a label selector
    pub fn has_selector(&self) -> bool {
        matches!(
            self,
            Self::ReplicaSet | Self::Deployment | Self::StatefulSet | Self::DaemonSet
        )
    }

    /// Whether the kind honours a replica count
    pub fn is_scalable(&self) -> bool {
        matches!(self, Self::ReplicaSet | Self::Deployment | Self::StatefulSet)
    }
}

impl std::fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadKind {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                CoreError::UnknownWorkloadKind {
                    kind: s.to_string(),
                    suggestion: closest_match(s, &names),
                }
            })
    }
}

/// How a workload is exposed on the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExposeKind {
    Service,
    /// Reserved, synthesis fails until implemented
    Ingress,
    /// Reserved, synthesis fails until implemented
    ReverseProxy,
}

impl ExposeKind {
    pub const ALL: [ExposeKind; 3] = [Self::Service, Self::Ingress, Self::ReverseProxy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Ingress => "Ingress",
            Self::ReverseProxy => "ReverseProxy",
        }
    }
}

impl std::fmt::Display for ExposeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExposeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                CoreError::UnknownExposeKind {
                    kind: s.to_string(),
                    suggestion: closest_match(s, &names),
                }
            })
    }
}

/// Pod restart policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    Never,
}

impl RestartPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::OnFailure => "OnFailure",
            Self::Never => "Never",
        }
    }
}

impl FromStr for RestartPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Always" => Ok(Self::Always),
            "OnFailure" => Ok(Self::OnFailure),
            "Never" => Ok(Self::Never),
            other => Err(CoreError::InvalidConfig {
                message: format!(
                    "unknown restart policy '{}' (expected Always, OnFailure or Never)",
                    other
                ),
            }),
        }
    }
}

/// A finalized workload, ready for synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub name: String,
    pub namespace: Option<String>,
    pub kind: WorkloadKind,
    pub expose: Option<ExposeKind>,
    pub containers: Vec<ContainerSpec>,
    pub volumes: Vec<Volume>,
    pub schedule: Option<String>,
    pub replicas: Option<i32>,
    pub restart_policy: Option<RestartPolicy>,
}

/// Fluent builder for [`WorkloadSpec`]
///
/// Containers and volumes only ever accumulate. Kind-specific rules (a
/// CronJob needs a schedule, every workload needs a container) are checked
/// when the workload is synthesized, not here.
#[derive(Debug, Clone, Default)]
pub struct WorkloadBuilder {
    name: Option<String>,
    namespace: Option<String>,
    kind: WorkloadKind,
    expose: Option<ExposeKind>,
    containers: Vec<ContainerSpec>,
    volumes: Vec<Volume>,
    schedule: Option<String>,
    replicas: Option<i32>,
    restart_policy: Option<RestartPolicy>,
}

impl WorkloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_kind(mut self, kind: WorkloadKind) -> Self {
        self.kind = kind;
        self
    }

    /// Request network exposure of the workload's ports
    pub fn with_expose(mut self, expose: ExposeKind) -> Self {
        self.expose = Some(expose);
        self
    }

    /// Cron expression for CronJob workloads
    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = Some(replicas);
        self
    }

    pub fn with_restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart_policy = Some(policy);
        self
    }

    pub fn with_container(mut self, container: impl Into<ContainerSpec>) -> Self {
        self.containers.push(container.into());
        self
    }

    /// Attach a volume binding.
    ///
    /// The volume is appended to the workload and the mount to every
    /// container the binding targets, in one step. Only containers already
    /// added are considered.
    pub fn with_volume(mut self, binding: VolumeBinding) -> Self {
        let VolumeBinding {
            volume,
            mount,
            target,
        } = binding;

        let mut matched = 0usize;
        for container in self
            .containers
            .iter_mut()
            .filter(|c| target.matches(&c.name))
        {
            container.volume_mounts.push(mount.clone());
            matched += 1;
        }

        if matched == 0 {
            match &target {
                MountTarget::All => tracing::warn!(
                    volume = %volume.name,
                    "volume bound before any container was added; no mounts created"
                ),
                MountTarget::Container(name) => tracing::warn!(
                    volume = %volume.name,
                    container = %name,
                    "volume targets a container that is not part of the workload"
                ),
            }
        }

        self.volumes.push(volume);
        self
    }

    /// Attach a volume binding to a single named container
    pub fn with_volume_for(self, binding: VolumeBinding, container: impl Into<String>) -> Self {
        self.with_volume(binding.for_container(container))
    }

    /// Explicit name, if one was set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> WorkloadKind {
        self.kind
    }

    /// Finalize the spec.
    ///
    /// The explicit name wins; otherwise the scope identifier is used. Fails
    /// with [`CoreError::MissingName`] when there is neither.
    pub fn build(self, scope_id: Option<&str>) -> Result<WorkloadSpec> {
        let name = self
            .name
            .or_else(|| scope_id.map(str::to_string))
            .filter(|n| !n.is_empty())
            .ok_or(CoreError::MissingName)?;

        Ok(WorkloadSpec {
            name,
            namespace: self.namespace,
            kind: self.kind,
            expose: self.expose,
            containers: self.containers,
            volumes: self.volumes,
            schedule: self.schedule,
            replicas: self.replicas,
            restart_policy: self.restart_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ContainerBuilder, container};
    use crate::volume::bind_host_path;

    #[test]
    fn test_kind_parse() {
        for kind in WorkloadKind::ALL {
            assert_eq!(kind.as_str().parse::<WorkloadKind>().unwrap(), kind);
        }
        assert_eq!("cronjob".parse::<WorkloadKind>().unwrap(), WorkloadKind::CronJob);
    }

    #[test]
    fn test_unknown_kind_has_suggestion() {
        let err = "Deploymnt".parse::<WorkloadKind>().unwrap_err();
        match &err {
            CoreError::UnknownWorkloadKind { kind, .. } => assert_eq!(kind, "Deploymnt"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.suggestion(), Some("Deployment"));
    }

    #[test]
    fn test_expose_parse() {
        assert_eq!("service".parse::<ExposeKind>().unwrap(), ExposeKind::Service);
        assert_eq!(
            "ReverseProxy".parse::<ExposeKind>().unwrap(),
            ExposeKind::ReverseProxy
        );
        assert!(matches!(
            "LoadBalancer".parse::<ExposeKind>(),
            Err(CoreError::UnknownExposeKind { .. })
        ));
    }

    #[test]
    fn test_default_kind_is_deployment() {
        let spec = WorkloadBuilder::new().build(Some("app")).unwrap();
        assert_eq!(spec.kind, WorkloadKind::Deployment);
    }

    #[test]
    fn test_build_name_resolution() {
        let spec = WorkloadBuilder::new()
            .with_name("explicit")
            .build(Some("scope"))
            .unwrap();
        assert_eq!(spec.name, "explicit");

        let spec = WorkloadBuilder::new().build(Some("scope")).unwrap();
        assert_eq!(spec.name, "scope");

        assert!(matches!(
            WorkloadBuilder::new().build(None),
            Err(CoreError::MissingName)
        ));
        assert!(matches!(
            WorkloadBuilder::new().build(Some("")),
            Err(CoreError::MissingName)
        ));
    }

    #[test]
    fn test_build_does_not_validate_containers() {
        let spec = WorkloadBuilder::new()
            .with_kind(WorkloadKind::CronJob)
            .build(Some("empty"))
            .unwrap();
        assert!(spec.containers.is_empty());
        assert!(spec.schedule.is_none());
    }

    #[test]
    fn test_volume_without_target_mounts_all_present() {
        let spec = WorkloadBuilder::new()
            .with_container(container("a/one"))
            .with_container(container("a/two"))
            .with_volume(bind_host_path("data", "/srv/data", "/data", None))
            .with_container(container("a/three"))
            .build(Some("w"))
            .unwrap();

        assert_eq!(spec.volumes.len(), 1);
        assert_eq!(spec.containers[0].volume_mounts.len(), 1);
        assert_eq!(spec.containers[1].volume_mounts.len(), 1);
        assert!(spec.containers[2].volume_mounts.is_empty());
    }

    #[test]
    fn test_volume_with_target_mounts_only_match() {
        let spec = WorkloadBuilder::new()
            .with_container(container("a/app"))
            .with_container(ContainerBuilder::named("busybox", "sidecar"))
            .with_volume_for(bind_host_path("cfg", "/srv/cfg", "/cfg", Some(true)), "sidecar")
            .build(Some("w"))
            .unwrap();

        assert_eq!(spec.volumes.len(), 1);
        assert!(spec.containers[0].volume_mounts.is_empty());
        assert_eq!(spec.containers[1].volume_mounts.len(), 1);
        assert_eq!(spec.containers[1].volume_mounts[0].mount_path, "/cfg");
    }

    #[test]
    fn test_volume_with_unknown_target_keeps_volume() {
        let spec = WorkloadBuilder::new()
            .with_container(container("a/app"))
            .with_volume_for(bind_host_path("cfg", "/srv/cfg", "/cfg", None), "missing")
            .build(Some("w"))
            .unwrap();

        assert_eq!(spec.volumes.len(), 1);
        assert!(spec.containers[0].volume_mounts.is_empty());
    }

    #[test]
    fn test_volumes_keep_order() {
        let spec = WorkloadBuilder::new()
            .with_container(container("a/app"))
            .with_volume(bind_host_path("one", "/1", "/one", None))
            .with_volume(bind_host_path("two", "/2", "/two", None))
            .build(Some("w"))
            .unwrap();

        let names: Vec<_> = spec.volumes.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["one", "two"]);
        let mounts: Vec<_> = spec.containers[0]
            .volume_mounts
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(mounts, ["one", "two"]);
    }
}
