//! Container model and builder

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;
use crate::volume::Mount;
use crate::workload::{WorkloadBuilder, WorkloadKind};

/// Create a container builder for an image, naming it after the image
pub fn container(image: impl Into<String>) -> ContainerBuilder {
    ContainerBuilder::new(image)
}

/// Derive a container name from an image reference.
///
/// Takes the last path segment and drops any `:tag` or `@digest`, so
/// `ghcr.io/linuxserver/sonarr:latest` becomes `sonarr`. A registry port
/// (`localhost:5000/app`) is never mistaken for a tag.
pub fn name_from_image(image: &str) -> String {
    let last = image.rsplit('/').next().unwrap_or(image);
    let last = last.split('@').next().unwrap_or(last);
    let last = last.split(':').next().unwrap_or(last);
    last.to_string()
}

/// Port protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Sctp => "SCTP",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TCP" => Ok(Self::Tcp),
            "UDP" => Ok(Self::Udp),
            "SCTP" => Ok(Self::Sctp),
            _ => Err(CoreError::UnknownProtocol {
                protocol: s.to_string(),
            }),
        }
    }
}

/// A declared container port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub number: i32,
    pub protocol: Option<Protocol>,
    pub name: Option<String>,
}

/// Where an environment variable gets its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSource {
    /// Literal value
    Value(String),
    /// Key of a Kubernetes Secret
    SecretKey { secret: String, key: String },
}

/// A container environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub source: EnvSource,
}

/// Accumulated configuration of a single container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub env: Vec<EnvVar>,
    pub ports: Vec<PortSpec>,
    pub volume_mounts: Vec<Mount>,
}

impl ContainerSpec {
    /// Create a container spec; the name is derived from the image when absent
    pub fn new(image: impl Into<String>, name: Option<String>) -> Self {
        let image = image.into();
        let name = name.unwrap_or_else(|| name_from_image(&image));
        Self {
            name,
            image,
            env: Vec::new(),
            ports: Vec::new(),
            volume_mounts: Vec::new(),
        }
    }
}

/// Fluent builder for [`ContainerSpec`]
///
/// List setters always append; scalar setters replace the previous value.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    spec: ContainerSpec,
}

impl ContainerBuilder {
    /// Start a container whose name is derived from the image
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            spec: ContainerSpec::new(image, None),
        }
    }

    /// Start a container with an explicit name
    pub fn named(image: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            spec: ContainerSpec::new(image, Some(name.into())),
        }
    }

    /// Replace the container name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.spec.name = name.into();
        self
    }

    /// Replace the image. The name stays as it was derived at creation.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.spec.image = image.into();
        self
    }

    pub fn with_env(mut self, env: EnvVar) -> Self {
        self.spec.env.push(env);
        self
    }

    pub fn with_port(mut self, port: PortSpec) -> Self {
        self.spec.ports.push(port);
        self
    }

    /// Name the container currently carries
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Promote this container into a new workload of the given kind.
    ///
    /// The container becomes the workload's only member and its name the
    /// workload's name.
    pub fn into_workload(self, kind: WorkloadKind) -> WorkloadBuilder {
        WorkloadBuilder::new()
            .with_name(self.spec.name.clone())
            .with_kind(kind)
            .with_container(self.spec)
    }

    /// Promote this container into a Deployment
    pub fn into_deployment(self) -> WorkloadBuilder {
        self.into_workload(WorkloadKind::default())
    }

    pub fn build(self) -> ContainerSpec {
        self.spec
    }
}

impl From<ContainerBuilder> for ContainerSpec {
    fn from(builder: ContainerBuilder) -> Self {
        builder.build()
    }
}
