//! Shorthand constructors for environment variables and ports

use crate::container::{EnvSource, EnvVar, PortSpec, Protocol};

/// Environment variable with a literal value
pub fn env(name: impl Into<String>, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: name.into(),
        source: EnvSource::Value(value.into()),
    }
}

/// Environment variable read from a key of a Kubernetes Secret
pub fn env_secret(
    name: impl Into<String>,
    secret: impl Into<String>,
    key: impl Into<String>,
) -> EnvVar {
    EnvVar {
        name: name.into(),
        source: EnvSource::SecretKey {
            secret: secret.into(),
            key: key.into(),
        },
    }
}

/// Bare container port, protocol and name left unset
pub fn port(number: i32) -> PortSpec {
    PortSpec {
        number,
        protocol: None,
        name: None,
    }
}

/// Container port with protocol and/or name
pub fn port_with(number: i32, protocol: Option<Protocol>, name: Option<&str>) -> PortSpec {
    PortSpec {
        number,
        protocol,
        name: name.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_secret() {
        let var = env_secret("API_KEY", "sonarr", "api-key");
        assert_eq!(var.name, "API_KEY");
        assert_eq!(
            var.source,
            EnvSource::SecretKey {
                secret: "sonarr".to_string(),
                key: "api-key".to_string()
            }
        );
    }

    #[test]
    fn test_port_with() {
        let p = port_with(53, Some(Protocol::Udp), Some("dns"));
        assert_eq!(p.number, 53);
        assert_eq!(p.protocol, Some(Protocol::Udp));
        assert_eq!(p.name.as_deref(), Some("dns"));

        let bare = port(8989);
        assert!(bare.protocol.is_none() && bare.name.is_none());
    }
}
