use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::header_generation::HeaderGenerator;
use crate::manifest::{FixtureManifest, ManifestGenerator};
use crate::selfcheck;
use crate::signature;

#[derive(Parser)]
#[command(name = "cfixture")]
#[command(about = "Inspect and verify the cfixture C ABI test library")]
#[command(version)]
pub struct Cli {
    /// Log at debug level (overridden by CFIXTURE_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit the JSON manifest describing the exported functions
    Manifest {
        /// Rust target triple the harness links against (defaults to host)
        #[arg(long)]
        target: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Emit the C header declaring the exported functions
    Header {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Check a manifest file against the functions this library exports
    Validate {
        /// Path to the manifest JSON
        path: PathBuf,
    },

    /// Call every exported function and verify the results
    Check,

    /// Check system requirements for building a harness against the library
    Doctor,
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Manifest { target, output } => manifest_command(target, output),
        Commands::Header { output } => header_command(output),
        Commands::Validate { path } => validate_command(&path).map(|_| ()),
        Commands::Check => check_command(),
        Commands::Doctor => doctor_command(),
    }
}

/// Logs go to stderr so generated artifacts can be piped from stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("CFIXTURE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn manifest_command(target: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let rustc_target = match target {
        Some(target) => target,
        None => get_host_target()?,
    };
    debug!(target = %rustc_target, "generating manifest");

    let generator = ManifestGenerator::new();
    let manifest = generator.generate(&rustc_target);

    match output {
        Some(path) => {
            let path = generator.write_manifest(&manifest, &path)?;
            info!("Generated manifest: {}", path.display());
        }
        None => println!("{}", generator.to_json(&manifest)?),
    }

    Ok(())
}

fn header_command(output: Option<PathBuf>) -> Result<()> {
    let generator = HeaderGenerator::new();

    match output {
        Some(path) => {
            let path = generator.write_header(&path)?;
            info!("Generated header: {}", path.display());
        }
        None => print!("{}", generator.render()),
    }

    Ok(())
}

fn validate_command(path: &Path) -> Result<FixtureManifest> {
    let generator = ManifestGenerator::new();
    let manifest = generator.read_manifest(path)?;
    generator
        .validate_manifest(&manifest)
        .with_context(|| format!("Manifest {} does not match this library", path.display()))?;

    println!(
        "✓ {} matches {} {} ({} functions)",
        path.display(),
        manifest.crate_name,
        manifest.version,
        manifest.functions.len()
    );

    Ok(manifest)
}

fn check_command() -> Result<()> {
    let outcomes = selfcheck::run_checks();

    for outcome in &outcomes {
        let mark = if outcome.passed { "✓" } else { "✗" };
        println!("{} {}: {}", mark, outcome.name, outcome.detail);
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    if failed > 0 {
        return Err(anyhow::anyhow!("{} of {} checks failed", failed, outcomes.len()));
    }

    println!("\n✓ All {} checks passed", outcomes.len());
    Ok(())
}

fn doctor_command() -> Result<()> {
    println!("cfixture doctor - checking harness requirements...\n");

    match which::which("cc") {
        Ok(path) => println!("✓ C compiler found at: {}", path.display()),
        Err(_) => {
            println!("✗ C compiler not found (cc)");
            println!("  Needed only to compile harnesses against the generated header");
        }
    }

    let host = get_host_target()?;
    let manifest = ManifestGenerator::new().generate(&host);
    println!("\nHost target: {}", host);
    println!("  cdylib:    {}", manifest.library.cdylib);
    println!("  staticlib: {}", manifest.library.staticlib);
    println!("  link libs: {}", manifest.link_libs.join(", "));

    let catalog = signature::catalog();
    let with_outputs = catalog
        .iter()
        .filter(|sig| !sig.outargs().is_empty() || !sig.inoutargs().is_empty())
        .count();
    let with_arrays = catalog.iter().filter(|sig| !sig.arrays().is_empty()).count();
    println!("\nExported functions: {}", catalog.len());
    println!("  with output parameters: {}", with_outputs);
    println!("  with array parameters:  {}", with_arrays);

    let outcomes = selfcheck::run_checks();
    if selfcheck::all_passed(&outcomes) {
        println!("\n✓ Self-check passed ({} checks)", outcomes.len());
    } else {
        println!("\n✗ Self-check failed, run `cfixture check` for details");
    }

    println!("\n✓ cfixture doctor check complete");

    Ok(())
}

fn get_host_target() -> Result<String> {
    if cfg!(target_os = "linux") && cfg!(target_arch = "x86_64") {
        Ok("x86_64-unknown-linux-gnu".to_string())
    } else if cfg!(target_os = "linux") && cfg!(target_arch = "aarch64") {
        Ok("aarch64-unknown-linux-gnu".to_string())
    } else if cfg!(target_os = "macos") && cfg!(target_arch = "x86_64") {
        Ok("x86_64-apple-darwin".to_string())
    } else if cfg!(target_os = "macos") && cfg!(target_arch = "aarch64") {
        Ok("aarch64-apple-darwin".to_string())
    } else if cfg!(target_os = "windows") && cfg!(target_arch = "x86_64") {
        Ok("x86_64-pc-windows-msvc".to_string())
    } else {
        let output = std::process::Command::new("rustc")
            .args(["--version", "--verbose"])
            .output()
            .context("Failed to run rustc to detect host target")?;

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .find_map(|line| line.strip_prefix("host: "))
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Could not detect host target"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_manifest_args() {
        let cli = Cli::try_parse_from([
            "cfixture",
            "manifest",
            "--target",
            "aarch64-apple-darwin",
            "-o",
            "out/cfixture.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Manifest { target, output } => {
                assert_eq!(target.as_deref(), Some("aarch64-apple-darwin"));
                assert_eq!(output, Some(PathBuf::from("out/cfixture.json")));
            }
            _ => panic!("expected manifest command"),
        }
    }

    #[test]
    fn test_parse_validate_args() {
        let cli = Cli::try_parse_from(["cfixture", "validate", "cfixture.json"]).unwrap();
        match cli.command {
            Commands::Validate { path } => assert_eq!(path, PathBuf::from("cfixture.json")),
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_validate_command_accepts_written_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfixture.json");
        let generator = ManifestGenerator::new();
        let manifest = generator.generate("x86_64-unknown-linux-gnu");
        generator.write_manifest(&manifest, &path).unwrap();

        assert_eq!(validate_command(&path).unwrap(), manifest);
    }

    #[test]
    fn test_validate_command_rejects_drifted_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfixture.json");
        let generator = ManifestGenerator::new();
        let mut manifest = generator.generate("x86_64-unknown-linux-gnu");
        manifest.functions.retain(|f| f.name != "point_sety");
        manifest.functions[0].ret = crate::signature::CType::Double;
        generator.write_manifest(&manifest, &path).unwrap();

        let err = validate_command(&path).unwrap_err();
        assert!(err.to_string().contains("does not match this library"));
    }

    #[test]
    fn test_validate_command_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_command(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["cfixture", "check", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_host_target_detected() {
        let host = get_host_target().unwrap();
        assert!(host.contains('-'));
    }
}
