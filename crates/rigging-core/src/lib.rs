//! Rigging Core - builders for Kubernetes workloads
//!
//! This crate provides the model that the engine synthesizes into resources:
//! - `ContainerBuilder` / `ContainerSpec`: one container's image, env, ports and mounts
//! - `VolumeBinding`: a host path volume paired with its mount
//! - `WorkloadBuilder` / `WorkloadSpec`: containers plus kind, exposure and kind parameters
//! - `RigFile`: the declarative Rig.yaml format
//! - `to_dns_label`: DNS-safe names from scope paths

pub mod config;
pub mod container;
pub mod error;
pub mod ext;
pub mod helpers;
pub mod names;
pub mod volume;
pub mod workload;

pub use config::{RigFile, RigMetadata, WebServiceEntry, WorkloadEntry};
pub use container::{
    ContainerBuilder, ContainerSpec, EnvSource, EnvVar, PortSpec, Protocol, container,
    name_from_image,
};
pub use error::{CoreError, Result};
pub use ext::{LinuxServerDefaults, LinuxServerEnv, linuxserver_config};
pub use helpers::{env, env_secret, port, port_with};
pub use names::to_dns_label;
pub use volume::{Mount, MountTarget, Volume, VolumeBinding, bind_host_path};
pub use workload::{ExposeKind, RestartPolicy, WorkloadBuilder, WorkloadKind, WorkloadSpec};
