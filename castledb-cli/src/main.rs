//! CastleDB code generator command line.
//!
//! Reads a `.cdb` document, generates Rust code for its schema and writes it
//! to the output path in one atomic step.

use anyhow::Context;
use castledb_codegen::config::{
    SWITCH_BINARY, SWITCH_DATABASE, SWITCH_ID, SWITCH_INHERIT, SWITCH_NAMESPACE,
};
use castledb_codegen::{GeneratorConfig, generate_from_file};
use clap::Parser;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generate typed Rust code from a CastleDB database
#[derive(Parser, Debug)]
#[command(name = "castledbgen")]
#[command(version, about = "Generate typed Rust code from a CastleDB database")]
pub struct Args {
    /// CastleDB document to read
    pub input: PathBuf,

    /// Rust source file to write
    pub output: PathBuf,

    /// Name of the aggregate database type
    #[arg(long)]
    pub db: Option<String>,

    /// Identifier representation (accepted, no effect)
    #[arg(long)]
    pub id: Option<String>,

    /// Binary channel: `on` adds it, `only` replaces JSON with it
    #[arg(long)]
    pub bin: Option<String>,

    /// Trait path implemented by every generated type
    #[arg(long)]
    pub inherit: Option<String>,

    /// Module wrapping the generated code
    #[arg(long)]
    pub ns: Option<String>,

    /// Path of the runtime crate in generated code
    #[arg(long)]
    pub runtime: Option<String>,
}

impl Args {
    /// Collects the switch options into the generator's switch map.
    fn switches(&self) -> HashMap<String, String> {
        [
            (SWITCH_DATABASE, &self.db),
            (SWITCH_ID, &self.id),
            (SWITCH_BINARY, &self.bin),
            (SWITCH_INHERIT, &self.inherit),
            (SWITCH_NAMESPACE, &self.ns),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|value| (key.to_string(), value.clone())))
        .collect()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("castledb=info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::from_switches(&args.switches())?;
    if let Some(runtime) = &args.runtime {
        config = config.with_runtime_path(runtime);
    }

    let generated = generate_from_file(&args.input, &config)
        .with_context(|| format!("failed to generate code from {}", args.input.display()))?;

    for diagnostic in &generated.diagnostics {
        tracing::warn!("{diagnostic}");
    }

    write_atomically(&args.output, generated.code.as_bytes())
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        skipped = generated.diagnostics.len(),
        "generated code"
    );
    Ok(())
}

/// Writes `contents` to a temporary file next to `path`, then renames it over
/// `path`.
fn write_atomically(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.persist(path)?;
    Ok(())
}
