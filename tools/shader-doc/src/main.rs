//! shader-doc - Doxygen input filter for GLSL shaders
//!
//! Register it in the Doxyfile for every shader extension:
//!
//! ```text
//! FILE_PATTERNS  += *.vert *.frag *.geom *.tessc *.tesse *.glsl
//! EXTENSION_MAPPING = vert=C++ frag=C++ geom=C++ tessc=C++ tesse=C++ glsl=C++
//! FILTER_PATTERNS = *.vert=shader-doc *.frag=shader-doc *.geom=shader-doc \
//!                   *.tessc=shader-doc *.tesse=shader-doc *.glsl=shader-doc
//! ```
//!
//! The transformed shader is written to stdout. Diagnostics go to stderr
//! (`RUST_LOG=debug` for details); any failure exits with status 1 and no output.

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use shader_doc::{Profile, ShaderDocConfig, Transformer};

#[derive(Parser)]
#[command(name = "shader-doc")]
#[command(about = "Rewrite a GLSL shader as a documented pseudo-class for Doxygen")]
#[command(version)]
struct Cli {
    /// Shader file to filter
    input: PathBuf,

    /// Path to a shader-doc.toml configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset stage/rule set: full, gpu or minimal (overrides the configuration)
    #[arg(short, long)]
    profile: Option<Profile>,
}

fn main() -> ExitCode {
    // stdout carries the document, so logs always go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ShaderDocConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => ShaderDocConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config.profile = profile;
        config
            .validate()
            .with_context(|| format!("Configuration is invalid for profile {:?}", profile))?;
    }

    let transformer = Transformer::new(&config);
    debug!(
        "profile {:?}, stages [{}], rules {:?}",
        config.profile,
        transformer.stages().extensions().join(", "),
        transformer.rules()
    );

    let doc = transformer
        .transform_file(&cli.input)
        .with_context(|| format!("Failed to filter {}", cli.input.display()))?;

    // Nothing is written until the whole document is built
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(doc.header.as_bytes())
        .context("Failed to write header")?;
    stdout
        .write_all(doc.body.as_bytes())
        .context("Failed to write body")?;
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}
