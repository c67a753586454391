//! Development automation tasks for the `Rotaboard` workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{anyhow, Context};

/// Written by `cargo xtask sample-config`
const SAMPLE_CONFIG_PATH: &str = "rotaboard.example.toml";

const SAMPLE_CONFIG: &str = r#"# Rotaboard configuration
#
# Copy to rotaboard.toml (or config.toml) and adjust. Every [rotation] key
# can be overridden with ROTABOARD_<KEY_IN_UPPERCASE>.

[rotation]
# Wait after a successful cycle, multiplied by the rank of the next widget
base_interval_ms = 30000
# Wait after a failed or timed out cycle
retry_delay_ms = 100
# Upper bound on a single widget call
widget_timeout_ms = 20000
# How long shutdown waits for the rotation task
join_timeout_ms = 5000

[[widgets]]
name = "build-status"
url = "https://ci.example.com/api/status"
rank = 1

[[widgets]]
name = "open-incidents"
url = "https://status.example.com/api/incidents"
rank = 2

[widgets.headers]
Authorization = "Bearer change-me"
"#;

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("sample-config") => write_sample_config(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Rotaboard Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci             Run fmt, clippy and test");
    println!("    fmt            Check Rust code formatting");
    println!("    clippy         Run Clippy lints on every target");
    println!("    test           Run all workspace tests");
    println!("    sample-config  Write {SAMPLE_CONFIG_PATH} with every option documented");
    println!("    help           Show this help message");
}

fn run_ci() -> anyhow::Result<()> {
    println!("==> fmt");
    run_fmt()?;
    println!("\n==> clippy");
    run_clippy()?;
    println!("\n==> test");
    run_test()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

fn run_fmt() -> anyhow::Result<()> {
    cargo(&["fmt", "--all", "--", "--check"], "Format check failed. Run 'cargo fmt --all' to fix.")
}

fn run_clippy() -> anyhow::Result<()> {
    cargo(
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        "Clippy run failed. See output above.",
    )
}

fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace"], "Tests failed")
}

/// Run a cargo subcommand, failing with `failure` on a non-zero exit
fn cargo(args: &[&str], failure: &str) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to spawn cargo {}", args.join(" ")))?;

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("{failure}"))
    }
}

/// Write a documented example configuration to the workspace root
fn write_sample_config() -> anyhow::Result<()> {
    let path = PathBuf::from(SAMPLE_CONFIG_PATH);
    if path.exists() {
        anyhow::bail!("{} already exists; remove it first", path.display());
    }

    fs::write(&path, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Wrote {}", path.display());
    println!("  Copy it to rotaboard.toml and run: cargo run -p rotaboard-app");
    Ok(())
}
