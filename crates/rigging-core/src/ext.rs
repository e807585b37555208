//! Builder extensions for image families with shared conventions

use crate::container::ContainerBuilder;
use crate::helpers::env;
use crate::volume::{VolumeBinding, bind_host_path};

/// Environment LinuxServer.io images read at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinuxServerEnv {
    pub tz: String,
    pub puid: u32,
    pub pgid: u32,
}

impl Default for LinuxServerEnv {
    fn default() -> Self {
        Self {
            tz: "America/Los_Angeles".to_string(),
            puid: 1000,
            pgid: 100,
        }
    }
}

/// Adds the defaults LinuxServer.io containers expect
pub trait LinuxServerDefaults: Sized {
    /// `TZ`, `PUID` and `PGID` with the stock values
    fn with_linuxserver_defaults(self) -> Self {
        self.with_linuxserver_env(&LinuxServerEnv::default())
    }

    fn with_linuxserver_env(self, env: &LinuxServerEnv) -> Self;
}

impl LinuxServerDefaults for ContainerBuilder {
    fn with_linuxserver_env(self, ls: &LinuxServerEnv) -> Self {
        self.with_env(env("TZ", ls.tz.as_str()))
            .with_env(env("PUID", ls.puid.to_string()))
            .with_env(env("PGID", ls.pgid.to_string()))
    }
}

/// Bind a host directory to `/config`, where LinuxServer.io images keep state
pub fn linuxserver_config(name: impl Into<String>, host_path: impl Into<String>) -> VolumeBinding {
    bind_host_path(name, host_path, "/config", None)
}
