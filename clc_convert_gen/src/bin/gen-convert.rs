use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clc_convert::prelude::*;
use clc_convert_gen::*;

#[derive(Parser)]
#[command(name = "gen-convert", about = "Generate the OpenCL C convert_* builtins")]
struct Cli {
    /// Write the generated source here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also write a JSON listing of every generated function
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// long/ulong support: disabled, guarded or native
    #[arg(long)]
    int64: Option<Extension>,

    /// double support: disabled, guarded or native
    #[arg(long)]
    fp64: Option<Extension>,

    /// Show debug output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_logger_verbose();
    } else {
        init_logger();
    }

    let mut config = match &cli.config {
        Some(path) => GenConfig::from_file(path)?,
        None => GenConfig::default(),
    };
    config.apply_env()?;
    if let Some(int64) = cli.int64 {
        config.precision.int64 = int64;
    }
    if let Some(fp64) = cli.fp64 {
        config.precision.fp64 = fp64;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    if cli.manifest.is_some() {
        config.manifest = cli.manifest;
    }

    let plan = Plan::build(&config.precision).context("planning conversions")?;
    let source = CodeGen::generate(&plan).context("generating source")?;
    log::info!(
        "generated {} conversions ({} bytes, sha256 {})",
        plan.len(),
        source.len(),
        sha256(&source)
    );

    match &config.output {
        Some(path) => {
            std::fs::write(path, &source)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(source.as_bytes())?;
            lock.flush()?;
        }
    }

    if let Some(path) = &config.manifest {
        let json = Manifest::new(&plan, &source).to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote manifest {}", path.display());
    }
    Ok(())
}
