//! Pre-build hook execution
//!
//! Hooks run before the build step of a release: an optional script first,
//! then the configured commands in declaration order. The `fail_on_error`
//! flag decides whether a failing hook aborts the release or is downgraded
//! to a warning.

pub mod executor;

pub use executor::PreBuildRunner;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreBuildConfig;

    #[test]
    fn test_hooks_module_exports() {
        // Verify public API is accessible
        let config = PreBuildConfig::default();
        let _ = PreBuildRunner::new(&config);
    }
}
