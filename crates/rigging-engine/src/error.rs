//! Engine error types

use miette::Diagnostic;
use rigging_core::{CoreError, ExposeKind, WorkloadKind};
use thiserror::Error;

/// Main engine error type
///
/// Every synthesis failure is fatal to the workload being synthesized: no
/// document of that workload reaches the chart.
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("Workload '{workload}' ({kind}) has no containers")]
    #[diagnostic(
        code(rigging::synth::missing_container),
        help("add at least one container before synthesizing the workload")
    )]
    MissingContainer { workload: String, kind: WorkloadKind },

    #[error("CronJob '{workload}' has no schedule")]
    #[diagnostic(
        code(rigging::synth::missing_schedule),
        help("set a cron expression, for example \"0 3 * * *\"")
    )]
    MissingSchedule { workload: String },

    #[error("Exposure '{kind}' is not implemented (workload '{workload}')")]
    #[diagnostic(
        code(rigging::expose::not_implemented),
        help("use Service exposure instead")
    )]
    ExposureNotImplemented { workload: String, kind: ExposeKind },

    #[error("{0}")]
    #[diagnostic(code(rigging::model))]
    Core(#[from] CoreError),

    #[error("YAML error: {0}")]
    #[diagnostic(code(rigging::emit::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(rigging::emit::json))]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(rigging::emit::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        insta::assert_snapshot!(
            EngineError::MissingContainer {
                workload: "web".into(),
                kind: WorkloadKind::Deployment
            }
            .to_string(),
            @"Workload 'web' (Deployment) has no containers"
        );
        insta::assert_snapshot!(
            EngineError::MissingSchedule { workload: "backup".into() }.to_string(),
            @"CronJob 'backup' has no schedule"
        );
        insta::assert_snapshot!(
            EngineError::ExposureNotImplemented {
                workload: "web".into(),
                kind: ExposeKind::Ingress
            }
            .to_string(),
            @"Exposure 'Ingress' is not implemented (workload 'web')"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: EngineError = CoreError::MissingName.into();
        assert_eq!(
            err.to_string(),
            "Workload has neither a name nor a scope identifier"
        );
    }
}
