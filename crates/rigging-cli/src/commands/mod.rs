//! CLI commands

pub mod lint;
pub mod template;

use rigging_core::RigFile;
use rigging_engine::{Chart, WebServiceProps};
use std::path::Path;

use crate::error::{CliError, Result};

/// Load a Rig.yaml, mapping failures to config errors
pub fn load_rig(path: &Path) -> Result<RigFile> {
    RigFile::load(path).map_err(|e| CliError::config(&e))
}

/// Empty chart for a rig, with the namespace override applied
pub fn new_chart(rig: &RigFile, namespace: Option<&str>) -> Chart {
    let chart = Chart::new(rig.metadata.name.as_str());
    match namespace.or(rig.metadata.namespace.as_deref()) {
        Some(ns) => chart.with_namespace(ns),
        None => chart,
    }
}

/// Build every workload and web service of a rig, stopping at the first failure
pub fn build_chart(rig: &RigFile, namespace: Option<&str>) -> Result<Chart> {
    let mut chart = new_chart(rig, namespace);

    for entry in &rig.workloads {
        let builder = entry
            .to_builder()
            .map_err(|e| CliError::config_for(&entry.id, &e))?;
        chart
            .add_workload(&entry.id, builder)
            .map_err(|e| CliError::synthesis(&entry.id, &e))?;
    }

    for entry in &rig.web_services {
        chart.add_web_service(&entry.id, &WebServiceProps::from(entry));
    }

    Ok(chart)
}
