// build.rs
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=STATOO_COMMIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");

    // An explicit value wins, e.g. when packaging from a source tarball.
    let commit_hash = std::env::var("STATOO_COMMIT_HASH")
        .ok()
        .filter(|hash| !hash.trim().is_empty())
        .or_else(git_commit_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=STATOO_COMMIT_HASH={}", commit_hash.trim());
}

fn git_commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
