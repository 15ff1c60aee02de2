//! Custom cargo commands for pactguard.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests, default and `testing` feature
//!   cargo xtask check     - Quick check (test + clippy)
//!   cargo xtask doc       - Build docs with warnings denied
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("doc") => doc()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (fatal paths + tests + clippy + docs)
  test      Run all Rust tests, with and without the `testing` feature
  check     Quick check (cargo test + clippy)
  doc       Build docs with rustdoc warnings denied
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("pactguard Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking fatal paths...");
    check_fatal_paths()?;
    println!("✓ Only the fault module aborts\n");

    println!("[2/4] Running Rust tests...");
    test()?;
    println!("✓ All tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--workspace", "--all-targets", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Building docs...");
    doc()?;
    println!("✓ Docs build\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
///
/// The `testing` feature flips the default policy to `Raise`, so both
/// configurations are exercised.
fn test() -> Result<()> {
    run_cargo(&["test", "--workspace"])?;
    run_cargo(&["test", "--features", "testing"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/2] cargo test...");
    run_cargo(&["test", "--workspace", "--quiet"])?;

    println!("[2/2] cargo clippy...");
    run_cargo(&["clippy", "--workspace", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn doc() -> Result<()> {
    let root = project_root()?;
    let status = Command::new("cargo")
        .args(["doc", "--workspace", "--no-deps"])
        .env("RUSTDOCFLAGS", "-D warnings")
        .current_dir(&root)
        .status()
        .context("Failed to run cargo doc")?;

    if !status.success() {
        bail!("cargo doc failed");
    }
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench", "--bench", "contract_bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Every `process::abort` must go through `fault::report`, where the test
/// observer can intercept it.
fn check_fatal_paths() -> Result<()> {
    let src_dir = project_root()?.join("src");
    let mut offenders = Vec::new();
    let mut found = 0usize;

    for entry in std::fs::read_dir(&src_dir)
        .with_context(|| format!("Failed to read {}", src_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let hits = source.matches("process::abort").count();
        found += hits;
        if hits > 0 && file_name(&path) != "fault.rs" {
            offenders.push(file_name(&path).to_string());
        }
    }

    if !offenders.is_empty() {
        bail!("process::abort outside fault.rs: {}", offenders.join(", "));
    }
    if found == 0 {
        bail!("fault.rs no longer aborts; the Terminate policy has been lost");
    }
    Ok(())
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}
