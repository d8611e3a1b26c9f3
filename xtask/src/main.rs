use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::Command;

/// Heightmap written for `xtask run` when none exists yet.
const DEMO_HEIGHTMAP: &str = "heightmap.raw";
const DEMO_WIDTH: &str = "65";

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for terrainview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Run the mesh generation benchmark
    Bench,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Generate a demo heightmap if missing and launch the viewer
    Run,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt", &["fmt", "--all", "--", "--check"])?;
            cargo("clippy", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
            cargo("test", &["test", "--workspace"])?;
            cargo("doc", &["doc", "--workspace", "--no-deps"])?;
        }
        Commands::Fmt => cargo("fmt", &["fmt", "--all", "--", "--check"])?,
        Commands::Clippy => {
            cargo("clippy", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?
        }
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Bench => cargo("bench", &["bench", "-p", "terrainview-mesh"])?,
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
        Commands::Run => {
            if !Path::new(DEMO_HEIGHTMAP).exists() {
                cargo(
                    "generate heightmap",
                    &[
                        "run", "-p", "terrainview-cli", "--", "generate", DEMO_HEIGHTMAP, "--width",
                        DEMO_WIDTH,
                    ],
                )?;
            }
            cargo(
                "viewer",
                &[
                    "run", "--release", "-p", "terrainview-desktop", "--", "--heightmap",
                    DEMO_HEIGHTMAP, "--width", DEMO_WIDTH,
                ],
            )?;
        }
    }

    Ok(())
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {label}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {label} failed");
    }
    Ok(())
}
