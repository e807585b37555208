//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Workload has neither a name nor a scope identifier")]
    MissingName,

    #[error("Unknown workload kind: {kind}")]
    UnknownWorkloadKind {
        kind: String,
        suggestion: Option<String>,
    },

    #[error("Unknown expose kind: {kind}")]
    UnknownExposeKind {
        kind: String,
        suggestion: Option<String>,
    },

    #[error("Unknown port protocol: {protocol}")]
    UnknownProtocol { protocol: String },

    #[error("Rig file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Invalid Rig.yaml: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse Rig.yaml: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// "Did you mean" hint for unknown kind errors
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnknownWorkloadKind { suggestion, .. }
            | Self::UnknownExposeKind { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Maximum edit distance for a "did you mean" suggestion
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Find the closest known name for a misspelled one
pub(crate) fn closest_match(input: &str, candidates: &[&str]) -> Option<String> {
    let lowered = input.to_lowercase();
    candidates
        .iter()
        .map(|c| (c, strsim::levenshtein(&lowered, &c.to_lowercase())))
        .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(c, _)| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_match() {
        let kinds = ["Deployment", "DaemonSet", "StatefulSet"];
        assert_eq!(closest_match("deploymnet", &kinds).as_deref(), Some("Deployment"));
        assert_eq!(closest_match("statefulset", &kinds).as_deref(), Some("StatefulSet"));
        assert_eq!(closest_match("zzz", &kinds), None);
    }

    #[test]
    fn test_error_messages() {
        insta::assert_snapshot!(CoreError::MissingName.to_string(), @"Workload has neither a name nor a scope identifier");
        insta::assert_snapshot!(
            CoreError::UnknownWorkloadKind { kind: "Deploy".into(), suggestion: None }.to_string(),
            @"Unknown workload kind: Deploy"
        );
    }
}
