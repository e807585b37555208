//! Lint command - check that every workload of a rig synthesizes

use console::style;
use rigging_core::RigFile;
use serde::Serialize;
use std::path::Path;

use crate::error::{CliError, Result, engine_help, suggestion_help};

/// Outcome for one workload
#[derive(Debug, Serialize)]
pub struct WorkloadReport {
    pub id: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Outcome for a whole rig
#[derive(Debug, Serialize)]
pub struct LintReport {
    pub valid: bool,
    pub chart: String,
    pub workloads: Vec<WorkloadReport>,
}

impl LintReport {
    pub fn failed(&self) -> usize {
        self.workloads.iter().filter(|w| !w.ok).count()
    }
}

/// Synthesize each workload on its own so one failure does not hide the rest
pub fn check(rig: &RigFile) -> LintReport {
    let mut chart = super::new_chart(rig, None);
    let mut workloads = Vec::with_capacity(rig.workloads.len());

    for entry in &rig.workloads {
        let report = match entry.to_builder() {
            Err(e) => WorkloadReport {
                id: entry.id.clone(),
                ok: false,
                resources: Vec::new(),
                error: Some(e.to_string()),
                help: suggestion_help(&e),
            },
            Ok(builder) => match chart.add_workload(&entry.id, builder) {
                Ok(added) => WorkloadReport {
                    id: entry.id.clone(),
                    ok: true,
                    resources: added.iter().map(|r| r.display_name()).collect(),
                    error: None,
                    help: None,
                },
                Err(e) => WorkloadReport {
                    id: entry.id.clone(),
                    ok: false,
                    resources: Vec::new(),
                    error: Some(e.to_string()),
                    help: engine_help(&e),
                },
            },
        };
        tracing::debug!(workload = %report.id, ok = report.ok, "linted");
        workloads.push(report);
    }

    LintReport {
        valid: workloads.iter().all(|w| w.ok),
        chart: rig.metadata.name.clone(),
        workloads,
    }
}

pub fn run(file: &Path, json: bool) -> Result<()> {
    let rig = super::load_rig(file)?;
    let report = check(&rig);

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| CliError::Io {
            message: e.to_string(),
        })?;
        println!("{}", out);
    } else {
        print_report(file, &report);
    }

    if report.valid {
        Ok(())
    } else {
        Err(CliError::LintFailed {
            failed: report.failed(),
            total: report.workloads.len(),
        })
    }
}

fn print_report(file: &Path, report: &LintReport) {
    println!(
        "{} Linting {} (chart {})",
        style("→").blue(),
        file.display(),
        report.chart
    );

    for workload in &report.workloads {
        if workload.ok {
            println!(
                "  {} {}: {}",
                style("✓").green(),
                workload.id,
                workload.resources.join(", ")
            );
        } else {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                workload.id,
                workload.error.as_deref().unwrap_or("unknown error")
            );
            if let Some(help) = &workload.help {
                println!("    {} {}", style("help:").cyan(), help);
            }
        }
    }

    println!();
    if report.valid {
        println!("{} Linting passed!", style("✓").green().bold());
    } else {
        println!(
            "{} {} of {} workload(s) failed",
            style("✗").red().bold(),
            report.failed(),
            report.workloads.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_each_workload() {
        let rig = RigFile::parse(
            r#"apiVersion: rigging/v1
metadata:
  name: homelab
workloads:
  - id: good
    expose: Service
    containers:
      - image: nginx
        ports:
          - port: 80
  - id: empty
    kind: Job
  - id: typo
    kind: Deploymnt
    containers:
      - image: nginx
  - id: backup
    kind: CronJob
    containers:
      - image: restic/restic
"#,
        )
        .unwrap();

        let report = check(&rig);
        assert!(!report.valid);
        assert_eq!(report.failed(), 3);

        assert!(report.workloads[0].ok);
        assert_eq!(report.workloads[0].resources, ["Deployment/good", "Service/good"]);

        assert!(report.workloads[1].error.as_ref().unwrap().contains("no containers"));
        assert_eq!(
            report.workloads[2].help.as_deref(),
            Some("did you mean 'Deployment'?")
        );
        assert!(report.workloads[3].error.as_ref().unwrap().contains("no schedule"));
    }
}
