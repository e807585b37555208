//! Template command - render a rig to Kubernetes YAML

use console::style;
use rigging_engine::{DOCUMENT_SEPARATOR, EngineError, Resource};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{CliError, Result};

pub fn run(
    file: &Path,
    namespace: Option<&str>,
    output_dir: Option<&Path>,
    show_only: Option<&str>,
) -> Result<()> {
    let rig = super::load_rig(file)?;
    tracing::debug!(chart = %rig.metadata.name, workloads = rig.workloads.len(), "loaded rig");

    let chart = super::build_chart(&rig, namespace)?;

    let selected: Vec<&Resource> = chart
        .resources()
        .iter()
        .filter(|r| show_only.is_none_or(|kind| r.kind().eq_ignore_ascii_case(kind)))
        .collect();

    if let Some(dir) = output_dir {
        write_dir(dir, &selected)
    } else {
        write_stdout(&selected)
    }
}

/// File name for the n-th document, e.g. `00-deployment-sonarr.yaml`
pub fn document_file_name(index: usize, resource: &Resource) -> String {
    format!(
        "{:02}-{}-{}.yaml",
        index,
        resource.kind().to_lowercase(),
        resource.name()
    )
}

fn write_dir(dir: &Path, resources: &[&Resource]) -> Result<()> {
    fs::create_dir_all(dir)?;

    for (index, resource) in resources.iter().enumerate() {
        let path = dir.join(document_file_name(index, resource));
        fs::write(&path, render(resource)?)?;
        println!("{} {}", style("wrote").green(), path.display());
    }

    Ok(())
}

fn write_stdout(resources: &[&Resource]) -> Result<()> {
    let mut out = String::new();
    for (index, resource) in resources.iter().enumerate() {
        if index > 0 {
            out.push_str(DOCUMENT_SEPARATOR);
        }
        out.push_str(&format!("# Source: {}\n", resource.display_name()));
        out.push_str(&render(resource)?);
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn render(resource: &Resource) -> Result<String> {
    resource
        .to_yaml()
        .map_err(|e: EngineError| CliError::synthesis(resource.name(), &e))
}
