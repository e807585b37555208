//! Volume and mount bindings
//!
//! A [`VolumeBinding`] pairs the pod-level volume with the container-level
//! mount that references it. Both halves share one logical name and are
//! attached together by [`WorkloadBuilder::with_volume`].
//!
//! [`WorkloadBuilder::with_volume`]: crate::workload::WorkloadBuilder::with_volume

/// Pod-level volume backed by a path on the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub name: String,
    pub host_path: String,
}

/// Container-level mount of a named volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub name: String,
    pub mount_path: String,
    pub read_only: Option<bool>,
}

/// Which containers receive the mount half of a binding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MountTarget {
    /// Every container present when the binding is attached
    #[default]
    All,
    /// Only containers with this name
    Container(String),
}

impl MountTarget {
    pub fn matches(&self, container_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Container(name) => name == container_name,
        }
    }
}

/// A matched (volume, mount) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeBinding {
    pub volume: Volume,
    pub mount: Mount,
    pub target: MountTarget,
}

impl VolumeBinding {
    /// Restrict the mount to the container with this name
    pub fn for_container(mut self, name: impl Into<String>) -> Self {
        self.target = MountTarget::Container(name.into());
        self
    }

    /// Logical name shared by the volume and the mount
    pub fn name(&self) -> &str {
        &self.volume.name
    }
}

/// Bind a host directory into containers at `mount_path`
pub fn bind_host_path(
    name: impl Into<String>,
    host_path: impl Into<String>,
    mount_path: impl Into<String>,
    read_only: Option<bool>,
) -> VolumeBinding {
    let name = name.into();
    VolumeBinding {
        volume: Volume {
            name: name.clone(),
            host_path: host_path.into(),
        },
        mount: Mount {
            name,
            mount_path: mount_path.into(),
            read_only,
        },
        target: MountTarget::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_shares_name() {
        let b = bind_host_path("config", "/srv/app", "/config", Some(true));
        assert_eq!(b.volume.name, "config");
        assert_eq!(b.mount.name, "config");
        assert_eq!(b.volume.host_path, "/srv/app");
        assert_eq!(b.mount.mount_path, "/config");
        assert_eq!(b.mount.read_only, Some(true));
        assert_eq!(b.target, MountTarget::All);
    }

    #[test]
    fn test_target_matching() {
        assert!(MountTarget::All.matches("anything"));

        let target = MountTarget::Container("web".to_string());
        assert!(target.matches("web"));
        assert!(!target.matches("sidecar"));
    }

    #[test]
    fn test_for_container() {
        let b = bind_host_path("data", "/srv/data", "/data", None).for_container("db");
        assert_eq!(b.target, MountTarget::Container("db".to_string()));
        assert_eq!(b.name(), "data");
    }
}
