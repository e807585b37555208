//! CLI error types with exit code handling

use miette::Diagnostic;
use rigging_core::CoreError;
use rigging_engine::EngineError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Rig.yaml could not be loaded or translated
    #[error("Config error: {message}")]
    #[diagnostic(code(rigging::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A workload failed to synthesize
    #[error("Workload '{workload}' failed: {message}")]
    #[diagnostic(code(rigging::cli::synthesis))]
    Synthesis {
        workload: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Lint found failing workloads
    #[error("Lint failed: {failed} of {total} workload(s) have errors")]
    #[diagnostic(code(rigging::cli::lint))]
    LintFailed { failed: usize, total: usize },

    /// IO error (output directory, stdout)
    #[error("IO error: {message}")]
    #[diagnostic(code(rigging::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Synthesis { .. } => exit_codes::SYNTHESIS_ERROR,
            CliError::LintFailed { .. } => exit_codes::ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Wrap a model error, keeping any "did you mean" hint
    pub fn config(err: &CoreError) -> Self {
        Self::Config {
            message: err.to_string(),
            help: suggestion_help(err),
        }
    }

    /// Wrap a model error raised while translating one workload
    pub fn config_for(workload: &str, err: &CoreError) -> Self {
        Self::Config {
            message: format!("workload '{}': {}", workload, err),
            help: suggestion_help(err),
        }
    }

    /// Wrap an engine error raised for one workload
    pub fn synthesis(workload: &str, err: &EngineError) -> Self {
        Self::Synthesis {
            workload: workload.to_string(),
            message: err.to_string(),
            help: engine_help(err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Help text for an engine error: the diagnostic help, or the model hint
pub fn engine_help(err: &EngineError) -> Option<String> {
    match err {
        EngineError::Core(core) => suggestion_help(core),
        other => other.help().map(|h| h.to_string()),
    }
}

/// "did you mean" help for a model error
pub fn suggestion_help(err: &CoreError) -> Option<String> {
    err.suggestion().map(|s| format!("did you mean '{}'?", s))
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rigging_core::WorkloadKind;

    #[test]
    fn test_exit_codes() {
        let config = CliError::config(&CoreError::MissingName);
        assert_eq!(config.exit_code(), exit_codes::CONFIG_ERROR);

        let synth = CliError::synthesis(
            "web",
            &EngineError::MissingContainer {
                workload: "web".into(),
                kind: WorkloadKind::Job,
            },
        );
        assert_eq!(synth.exit_code(), exit_codes::SYNTHESIS_ERROR);
    }

    #[test]
    fn test_suggestion_becomes_help() {
        let err: CoreError = "Deploymnt".parse::<WorkloadKind>().unwrap_err();
        match CliError::config_for("web", &err) {
            CliError::Config { message, help } => {
                assert!(message.starts_with("workload 'web':"));
                assert_eq!(help.as_deref(), Some("did you mean 'Deployment'?"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_engine_help() {
        let err = EngineError::MissingSchedule {
            workload: "backup".into(),
        };
        assert!(engine_help(&err).unwrap().contains("cron expression"));
    }
}
