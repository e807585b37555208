//! Rig.yaml: declarative description of the workloads in a chart

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::container::{ContainerBuilder, PortSpec, Protocol};
use crate::error::{CoreError, Result};
use crate::ext::LinuxServerDefaults;
use crate::helpers::{env, env_secret};
use crate::volume::{MountTarget, bind_host_path};
use crate::workload::WorkloadBuilder;

/// Supported `apiVersion`
pub const API_VERSION: &str = "rigging/v1";

/// Parsed Rig.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigFile {
    /// API version (rigging/v1)
    pub api_version: String,

    /// Chart metadata
    pub metadata: RigMetadata,

    #[serde(default)]
    pub workloads: Vec<WorkloadEntry>,

    /// Fixed-shape web services (Service + Deployment)
    #[serde(default)]
    pub web_services: Vec<WebServiceEntry>,
}

/// Chart metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigMetadata {
    /// Chart identifier, the root of every scope path
    pub name: String,

    /// Namespace for workloads that do not set one
    #[serde(default)]
    pub namespace: Option<String>,
}

/// One workload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadEntry {
    /// Scope identifier, used as the name unless `name` is set
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub namespace: Option<String>,

    /// Workload kind (default: Deployment)
    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub expose: Option<String>,

    #[serde(default)]
    pub schedule: Option<String>,

    #[serde(default)]
    pub replicas: Option<i32>,

    #[serde(default)]
    pub restart_policy: Option<String>,

    #[serde(default)]
    pub containers: Vec<ContainerEntry>,

    /// Host path volumes, bound after every container is added
    #[serde(default)]
    pub volumes: Vec<VolumeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerEntry {
    pub image: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Add the LinuxServer.io TZ/PUID/PGID defaults
    #[serde(default)]
    pub linuxserver: bool,

    #[serde(default)]
    pub env: Vec<EnvEntry>,

    #[serde(default)]
    pub ports: Vec<PortEntry>,
}

/// Environment variable: exactly one of `value` or `secret`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvEntry {
    pub name: String,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub secret: Option<SecretKeyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeyEntry {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortEntry {
    pub port: i32,

    #[serde(default)]
    pub protocol: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeEntry {
    pub name: String,
    pub host_path: String,
    pub mount_path: String,

    #[serde(default)]
    pub read_only: Option<bool>,

    /// Mount only into this container (default: all containers)
    #[serde(default)]
    pub container: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebServiceEntry {
    pub id: String,
    pub image: String,

    #[serde(default)]
    pub replicas: Option<i32>,

    #[serde(default)]
    pub port: Option<i32>,

    #[serde(default)]
    pub container_port: Option<i32>,

    #[serde(default)]
    pub service_type: Option<String>,
}

impl RigFile {
    /// Load a Rig.yaml from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate Rig.yaml content
    pub fn parse(content: &str) -> Result<Self> {
        let rig: RigFile = serde_yaml::from_str(content)?;

        if rig.api_version != API_VERSION {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "Unsupported API version: {}. Expected: {}",
                    rig.api_version, API_VERSION
                ),
            });
        }

        if rig.metadata.name.is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "metadata.name must not be empty".to_string(),
            });
        }

        Ok(rig)
    }
}

impl WorkloadEntry {
    /// Translate the entry into a workload builder.
    ///
    /// Containers are added in file order, then volumes are bound, so an
    /// untargeted volume reaches every container of the entry.
    pub fn to_builder(&self) -> Result<WorkloadBuilder> {
        let mut builder = WorkloadBuilder::new();

        if let Some(name) = &self.name {
            builder = builder.with_name(name.as_str());
        }
        if let Some(namespace) = &self.namespace {
            builder = builder.with_namespace(namespace.as_str());
        }
        if let Some(kind) = &self.kind {
            builder = builder.with_kind(kind.parse()?);
        }
        if let Some(expose) = &self.expose {
            builder = builder.with_expose(expose.parse()?);
        }
        if let Some(schedule) = &self.schedule {
            builder = builder.with_schedule(schedule.as_str());
        }
        if let Some(replicas) = self.replicas {
            builder = builder.with_replicas(replicas);
        }
        if let Some(policy) = &self.restart_policy {
            builder = builder.with_restart_policy(policy.parse()?);
        }

        for entry in &self.containers {
            builder = builder.with_container(entry.to_builder()?);
        }

        for entry in &self.volumes {
            let mut binding = bind_host_path(
                entry.name.as_str(),
                entry.host_path.as_str(),
                entry.mount_path.as_str(),
                entry.read_only,
            );
            if let Some(container) = &entry.container {
                binding.target = MountTarget::Container(container.clone());
            }
            builder = builder.with_volume(binding);
        }

        Ok(builder)
    }
}

impl ContainerEntry {
    pub fn to_builder(&self) -> Result<ContainerBuilder> {
        let mut builder = match &self.name {
            Some(name) => ContainerBuilder::named(self.image.as_str(), name.as_str()),
            None => ContainerBuilder::new(self.image.as_str()),
        };

        if self.linuxserver {
            builder = builder.with_linuxserver_defaults();
        }

        for var in &self.env {
            let var = match (&var.value, &var.secret) {
                (Some(value), None) => env(var.name.as_str(), value.as_str()),
                (None, Some(secret)) => {
                    env_secret(var.name.as_str(), secret.name.as_str(), secret.key.as_str())
                }
                _ => {
                    return Err(CoreError::InvalidConfig {
                        message: format!(
                            "env '{}' must set exactly one of 'value' or 'secret'",
                            var.name
                        ),
                    });
                }
            };
            builder = builder.with_env(var);
        }

        for port in &self.ports {
            builder = builder.with_port(PortSpec {
                number: port.port,
                protocol: port.protocol.as_deref().map(str::parse::<Protocol>).transpose()?,
                name: port.name.clone(),
            });
        }

        Ok(builder)
    }
}
