use std::path::{Path, PathBuf};
use std::process::Command;

const SHA_ENV: &str = "FINVIS_BUILD_SHA";

fn git_sha(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (out.status.success() && !sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let repo_root = manifest_dir.join("..");

    // source tarballs have no .git; packagers pass the revision in instead
    let sha = std::env::var(SHA_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_sha(&repo_root))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={SHA_ENV}={sha}");
    println!("cargo:rerun-if-env-changed={SHA_ENV}");
    let head = repo_root.join(".git/HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
    println!("cargo:rerun-if-changed=build.rs");
}
