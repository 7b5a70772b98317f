//! Command: print version information.

/// Version string baked in by `build.rs`, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("NIGHTROVER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the nightrover version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("nightrover {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
