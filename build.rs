//! Build script: embeds the crate version string.

use std::process::Command;

const VERSION_VAR: &str = "NIGHTROVER_VERSION";

/// Version from the nearest tag, or the short commit hash for untagged trees.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!version.is_empty()).then_some(version)
}

fn main() {
    // An explicit value (release builds) wins over the checkout state.
    let version = std::env::var(VERSION_VAR).ok().or_else(git_describe);
    if let Some(version) = version {
        println!("cargo:rustc-env={VERSION_VAR}={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
}
