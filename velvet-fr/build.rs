//! Emits GIT_HASH, GIT_DIRTY, BUILD_TIMESTAMP and BUILD_PROFILE for
//! `/api/buildinfo` and the startup banner.

use std::process::Command;

/// Trimmed stdout of a successful git invocation
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    let hash = git(&["rev-parse", "--short=8", "HEAD"]);
    let dirty = hash.is_some()
        && git(&["status", "--porcelain"]).map_or(false, |status| !status.is_empty());

    let env = [
        ("GIT_HASH", hash.unwrap_or_else(|| "unknown".to_string())),
        ("GIT_DIRTY", dirty.to_string()),
        (
            "BUILD_TIMESTAMP",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        ),
        (
            "BUILD_PROFILE",
            std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string()),
        ),
    ];

    for (key, value) in env {
        println!("cargo:rustc-env={}={}", key, value);
    }
}
