//! Shared pod template
//!
//! Every workload kind embeds the same pod template, compiled once from the
//! workload's containers, volumes and restart policy. Kind-specific wrapping
//! happens in the synthesizer; nothing here depends on the kind.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, EnvVarSource, HostPathVolumeSource, PodSpec,
    PodTemplateSpec, SecretKeySelector, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use rigging_core::{ContainerSpec, EnvSource, Mount, PortSpec, WorkloadSpec};

/// Label key tying controllers and services to their pods
pub const WORKLOAD_LABEL: &str = "workload";

/// `{workload: <name>}`
pub fn selector_labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(WORKLOAD_LABEL.to_string(), name.to_string())])
}

/// Label selector matching the pods of a workload
pub fn label_selector(name: &str) -> LabelSelector {
    LabelSelector {
        match_labels: Some(selector_labels(name)),
        ..Default::default()
    }
}

/// Compile the pod template of a workload
pub fn compile(spec: &WorkloadSpec) -> PodTemplateSpec {
    let volumes: Vec<Volume> = spec
        .volumes
        .iter()
        .map(|v| Volume {
            name: v.name.clone(),
            host_path: Some(HostPathVolumeSource {
                path: v.host_path.clone(),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect();

    PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(selector_labels(&spec.name)),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: spec.containers.iter().map(container).collect(),
            volumes: non_empty(volumes),
            restart_policy: spec.restart_policy.map(|p| p.as_str().to_string()),
            ..Default::default()
        }),
    }
}

fn container(spec: &ContainerSpec) -> Container {
    Container {
        name: spec.name.clone(),
        image: Some(spec.image.clone()),
        env: non_empty(spec.env.iter().map(env_var).collect()),
        ports: non_empty(spec.ports.iter().map(container_port).collect()),
        volume_mounts: non_empty(spec.volume_mounts.iter().map(volume_mount).collect()),
        ..Default::default()
    }
}

fn env_var(var: &rigging_core::EnvVar) -> EnvVar {
    match &var.source {
        EnvSource::Value(value) => EnvVar {
            name: var.name.clone(),
            value: Some(value.clone()),
            ..Default::default()
        },
        EnvSource::SecretKey { secret, key } => EnvVar {
            name: var.name.clone(),
            value_from: Some(EnvVarSource {
                secret_key_ref: Some(SecretKeySelector {
                    key: key.clone(),
                    name: secret.clone().into(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

fn container_port(port: &PortSpec) -> ContainerPort {
    ContainerPort {
        container_port: port.number,
        name: port.name.clone(),
        protocol: port.protocol.map(|p| p.as_str().to_string()),
        ..Default::default()
    }
}

fn volume_mount(mount: &Mount) -> VolumeMount {
    VolumeMount {
        name: mount.name.clone(),
        mount_path: mount.mount_path.clone(),
        read_only: mount.read_only,
        ..Default::default()
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigging_core::{
        ContainerBuilder, Protocol, RestartPolicy, WorkloadBuilder, bind_host_path, container,
        env, env_secret, port, port_with,
    };

    fn template_json(builder: WorkloadBuilder) -> serde_json::Value {
        let spec = builder.build(Some("app")).unwrap();
        serde_json::to_value(compile(&spec)).unwrap()
    }

    #[test]
    fn test_labels_match_selector() {
        let spec = WorkloadBuilder::new()
            .with_container(container("nginx"))
            .build(Some("web"))
            .unwrap();
        let template = compile(&spec);
        assert_eq!(
            template.metadata.unwrap().labels,
            label_selector("web").match_labels
        );
    }

    #[test]
    fn test_container_fields() {
        let json = template_json(
            WorkloadBuilder::new().with_container(
                container("ghcr.io/x/sonarr:latest")
                    .with_env(env("TZ", "UTC"))
                    .with_env(env_secret("API_KEY", "sonarr", "api-key"))
                    .with_port(port_with(8989, Some(Protocol::Tcp), Some("http"))),
            ),
        );

        let c = &json["spec"]["containers"][0];
        assert_eq!(c["name"], "sonarr");
        assert_eq!(c["image"], "ghcr.io/x/sonarr:latest");
        assert_eq!(c["env"][0]["name"], "TZ");
        assert_eq!(c["env"][0]["value"], "UTC");
        assert_eq!(c["env"][1]["valueFrom"]["secretKeyRef"]["name"], "sonarr");
        assert_eq!(c["env"][1]["valueFrom"]["secretKeyRef"]["key"], "api-key");
        assert_eq!(c["ports"][0]["containerPort"], 8989);
        assert_eq!(c["ports"][0]["protocol"], "TCP");
        assert_eq!(c["ports"][0]["name"], "http");
    }

    #[test]
    fn test_empty_lists_are_omitted() {
        let json = template_json(WorkloadBuilder::new().with_container(container("nginx")));
        let c = &json["spec"]["containers"][0];
        assert!(c.get("env").is_none());
        assert!(c.get("ports").is_none());
        assert!(c.get("volumeMounts").is_none());
        assert!(json["spec"].get("volumes").is_none());
        assert!(json["spec"].get("restartPolicy").is_none());
    }

    #[test]
    fn test_volumes_and_mounts() {
        let json = template_json(
            WorkloadBuilder::new()
                .with_container(container("a/app").with_port(port(80)))
                .with_container(ContainerBuilder::named("busybox", "sidecar"))
                .with_volume(bind_host_path("data", "/srv/data", "/data", Some(true)))
                .with_volume_for(bind_host_path("logs", "/var/log/app", "/logs", None), "sidecar"),
        );

        let volumes = &json["spec"]["volumes"];
        assert_eq!(volumes[0]["name"], "data");
        assert_eq!(volumes[0]["hostPath"]["path"], "/srv/data");
        assert_eq!(volumes[1]["name"], "logs");

        let app = &json["spec"]["containers"][0];
        assert_eq!(app["volumeMounts"].as_array().unwrap().len(), 1);
        assert_eq!(app["volumeMounts"][0]["mountPath"], "/data");
        assert_eq!(app["volumeMounts"][0]["readOnly"], true);

        let sidecar = &json["spec"]["containers"][1];
        assert_eq!(sidecar["volumeMounts"].as_array().unwrap().len(), 2);
        assert_eq!(sidecar["volumeMounts"][1]["name"], "logs");
        assert!(sidecar["volumeMounts"][1].get("readOnly").is_none());
    }

    #[test]
    fn test_restart_policy() {
        let json = template_json(
            WorkloadBuilder::new()
                .with_container(container("nginx"))
                .with_restart_policy(RestartPolicy::Never),
        );
        assert_eq!(json["spec"]["restartPolicy"], "Never");
    }
}
