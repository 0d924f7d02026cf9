pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use error::GeneratorError;

use config::{GeneratorConfig, GeneratorId};

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for document generators that produce files from an IR spec.
pub trait DocGenerator {
    fn id(&self) -> GeneratorId;

    /// File name used when the generator config does not set one.
    fn default_file_name(&self) -> &'static str;

    fn generate(
        &self,
        ir: &ir::IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
