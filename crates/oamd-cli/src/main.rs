mod source;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oamd_core::config::{self, CONFIG_FILE_NAME, GeneratorId, OamdConfig};
use oamd_core::ir::IrSpec;
use oamd_core::parse::{self, spec::OpenApiSpec};
use oamd_core::transform::{self, TransformOptions};
use oamd_core::{DocGenerator, GeneratedFile};
use oamd_markdown::{EndpointMapGenerator, ReferenceGenerator, SummaryGenerator};

#[derive(Parser)]
#[command(name = "oamd", about = "OpenAPI to markdown generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate markdown documents from an OpenAPI spec
    Generate {
        /// URL or path of the OpenAPI spec (JSON or YAML)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Validate an OpenAPI spec, failing on dangling references
    Validate {
        /// URL or path of the OpenAPI spec
        #[arg(short, long)]
        input: String,
    },

    /// Inspect the grouped operations of an OpenAPI spec
    Inspect {
        /// URL or path of the OpenAPI spec
        #[arg(short, long)]
        input: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new oamd configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input } => cmd_generate(input).await,

        Commands::Validate { input } => cmd_validate(&input).await,

        Commands::Inspect { input, format } => cmd_inspect(&input, format).await,

        Commands::Init { force } => cmd_init(Path::new(CONFIG_FILE_NAME), force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oamd", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OamdConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

fn transform_options(cfg: &OamdConfig) -> TransformOptions {
    TransformOptions {
        default_group: cfg.default_group.clone(),
        strict_refs: cfg.strict_refs,
    }
}

/// Parse document text, using the input's extension as a format hint.
fn parse_document(input: &str, content: &str) -> Result<OpenApiSpec> {
    let parsed = if input.ends_with(".json") {
        parse::from_json(content)
    } else if input.ends_with(".yaml") || input.ends_with(".yml") {
        parse::from_yaml(content)
    } else {
        parse::from_str(content)
    };
    parsed.with_context(|| format!("failed to parse {}", input))
}

async fn load_spec(input: &str) -> Result<OpenApiSpec> {
    let content = source::load_source(input).await?;
    parse_document(input, &content)
}

async fn load_ir(input: &str, options: &TransformOptions) -> Result<IrSpec> {
    let parsed = load_spec(input).await?;
    let ir = transform::transform_with_options(&parsed, options)?;
    Ok(ir)
}

/// Look up a generator by its ID.
fn get_generator(id: GeneratorId) -> Box<dyn DocGenerator> {
    match id {
        GeneratorId::Summary => Box::new(SummaryGenerator),
        GeneratorId::Endpoints => Box::new(EndpointMapGenerator),
        GeneratorId::Reference => Box::new(ReferenceGenerator),
    }
}

/// Write generated files under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Run every configured generator, resolving output directories against `root`.
fn run_generators(ir: &IrSpec, cfg: &OamdConfig, root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (gen_id, gen_config) in &cfg.generators {
        eprintln!("Generating {} → {}", gen_id, gen_config.output);
        let generator = get_generator(*gen_id);
        let files = generator
            .generate(ir, gen_config)
            .with_context(|| format!("{} generator failed", gen_id))?;
        let output_dir = root.join(&gen_config.output);
        written.extend(write_files(&output_dir, &files)?);
    }
    Ok(written)
}

async fn cmd_generate(input: Option<String>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| cfg.input.clone());
    let ir = load_ir(&input, &transform_options(&cfg)).await?;

    if cfg.generators.is_empty() {
        eprintln!("No generators configured. Add a `generators` section to your config.");
        return Ok(());
    }

    let written = run_generators(&ir, &cfg, Path::new("."))?;
    eprintln!(
        "Generated {} files for {} operations in {} groups",
        written.len(),
        ir.operations.len(),
        ir.groups.len()
    );
    Ok(())
}

async fn cmd_validate(input: &str) -> Result<()> {
    let parsed = load_spec(input).await?;

    eprintln!(
        "Valid OpenAPI {} spec: {}",
        parsed.openapi.as_deref().unwrap_or("3.x"),
        parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());

    // Also validate that every reference resolves
    let options = TransformOptions {
        strict_refs: true,
        ..TransformOptions::default()
    };
    let ir = transform::transform_with_options(&parsed, &options)?;
    eprintln!("  Operations: {}", ir.operations.len());
    eprintln!("  Groups: {}", ir.groups.len());

    eprintln!("Validation successful.");
    Ok(())
}

async fn cmd_inspect(input: &str, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let ir = load_ir(input, &transform_options(&cfg)).await?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let groups: Vec<serde_json::Value> = ir
        .groups
        .iter()
        .map(|g| {
            let operations: Vec<String> = ir.group_operations(g).map(|op| op.key()).collect();
            serde_json::json!({
                "name": g.name,
                "operations": operations,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "servers": ir.servers.iter().map(|s| &s.url).collect::<Vec<_>>(),
        "security_schemes": ir.security_schemes.iter().map(|s| &s.name).collect::<Vec<_>>(),
        "groups": groups,
        "schemas": ir.schemas.iter().map(|s| &s.name).collect::<Vec<_>>(),
    })
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
