//! Chart: an ordered set of resources emitted together

use std::io::Write;

use rigging_core::{WorkloadBuilder, to_dns_label};

use crate::error::Result;
use crate::resource::Resource;
use crate::synthesizer::Synthesizer;

/// Separator between YAML documents
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Collects synthesized resources under one identifier and emits them as a
/// YAML stream, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    id: String,
    namespace: Option<String>,
    resources: Vec<Resource>,
}

impl Chart {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            namespace: None,
            resources: Vec::new(),
        }
    }

    /// Namespace given to workloads that do not set their own
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// DNS label for a construct of this chart, e.g. `homelab-echo-1a2b3c4d`
    pub fn label_for(&self, id: &str) -> String {
        to_dns_label(&[self.id.as_str(), id])
    }

    /// Build, synthesize and register a workload under scope identifier `id`.
    ///
    /// Nothing is registered when any step fails.
    pub fn add_workload(&mut self, id: &str, builder: WorkloadBuilder) -> Result<&[Resource]> {
        let mut spec = builder.build(Some(id))?;
        if spec.namespace.is_none() {
            spec.namespace = self.namespace.clone();
        }

        let start = self.resources.len();
        for resource in Synthesizer::synthesize(&spec)?.into_resources() {
            tracing::debug!(chart = %self.id, resource = %resource.display_name(), "registered");
            self.resources.push(resource);
        }

        Ok(&self.resources[start..])
    }

    /// Register an already built resource
    pub fn add_resource(&mut self, resource: Resource) {
        tracing::debug!(chart = %self.id, resource = %resource.display_name(), "registered");
        self.resources.push(resource);
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Render every resource as a `---` separated YAML stream
    pub fn to_yaml(&self) -> Result<String> {
        let mut out = String::new();
        for (i, resource) in self.resources.iter().enumerate() {
            if i > 0 {
                out.push_str(DOCUMENT_SEPARATOR);
            }
            out.push_str(&resource.to_yaml()?);
        }
        Ok(out)
    }

    /// Write the YAML stream in one go
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let yaml = self.to_yaml()?;
        writer.write_all(yaml.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
