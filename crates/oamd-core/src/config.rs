use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.oamd.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OamdConfig {
    /// URL or file path of the OpenAPI document.
    pub input: String,
    /// Group heading used for operations without tags.
    pub default_group: String,
    /// Fail on dangling `$ref`s instead of warning.
    pub strict_refs: bool,
    pub generators: IndexMap<GeneratorId, GeneratorConfig>,
}

impl Default for OamdConfig {
    fn default() -> Self {
        let mut generators = IndexMap::new();
        generators.insert(GeneratorId::Summary, GeneratorConfig::default());
        generators.insert(GeneratorId::Endpoints, GeneratorConfig::default());
        Self {
            input: "openapi.json".to_string(),
            default_group: DEFAULT_GROUP.to_string(),
            strict_refs: false,
            generators,
        }
    }
}

/// Group name for operations that carry no tag.
pub const DEFAULT_GROUP: &str = "Other";

/// Which document generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorId {
    /// Flattened markdown summary.
    Summary,
    /// JSON map of `"METHOD /path"` to markdown fragment.
    Endpoints,
    /// Full markdown reference including schemas.
    Reference,
}

impl GeneratorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorId::Summary => "summary",
            GeneratorId::Endpoints => "endpoints",
            GeneratorId::Reference => "reference",
        }
    }
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-generator output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output directory.
    pub output: String,
    /// Overrides the generator's default file name.
    pub file_name: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: "public".to_string(),
            file_name: None,
        }
    }
}

impl GeneratorConfig {
    /// The configured file name, or `default` when none is set.
    pub fn file_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.file_name.as_deref().unwrap_or(default)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oamd.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OamdConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: OamdConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oamd configuration
input: openapi.json     # URL (http/https) or local path, JSON or YAML
default_group: Other    # heading for operations without tags
strict_refs: false      # fail on dangling $ref instead of warning

generators:
  summary:
    output: public      # writes public/llms.txt
  endpoints:
    output: public      # writes public/endpoints.json
  # reference:
  #   output: public
  #   file_name: llms-full.txt
"#
}
