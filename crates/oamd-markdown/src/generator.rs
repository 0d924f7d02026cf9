use oamd_core::config::{GeneratorConfig, GeneratorId};
use oamd_core::ir::IrSpec;
use oamd_core::{DocGenerator, GeneratedFile, GeneratorError};

use crate::emitters;

/// Flattened markdown summary (`llms.txt`).
pub struct SummaryGenerator;

/// Per-endpoint markdown fragments as JSON (`endpoints.json`).
pub struct EndpointMapGenerator;

/// Full markdown reference (`llms-full.txt`).
pub struct ReferenceGenerator;

impl DocGenerator for SummaryGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Summary
    }

    fn default_file_name(&self) -> &'static str {
        "llms.txt"
    }

    fn generate(
        &self,
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        Ok(vec![GeneratedFile {
            path: config.file_name_or(self.default_file_name()).to_string(),
            content: emitters::summary::emit_summary(ir),
        }])
    }
}

impl DocGenerator for EndpointMapGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Endpoints
    }

    fn default_file_name(&self) -> &'static str {
        "endpoints.json"
    }

    fn generate(
        &self,
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        Ok(vec![GeneratedFile {
            path: config.file_name_or(self.default_file_name()).to_string(),
            content: emitters::endpoints::emit_endpoint_map(ir)?,
        }])
    }
}

impl DocGenerator for ReferenceGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Reference
    }

    fn default_file_name(&self) -> &'static str {
        "llms-full.txt"
    }

    fn generate(
        &self,
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let content = emitters::reference::emit_reference(ir)
            .map_err(|e| GeneratorError::Template(e.to_string()))?;
        Ok(vec![GeneratedFile {
            path: config.file_name_or(self.default_file_name()).to_string(),
            content,
        }])
    }
}
