use crate::command::CommandRunner;
use crate::config::PreBuildConfig;
use crate::error::{GhcError, Result};
use crate::ui;

/// Executes the configured pre-build hooks
pub struct PreBuildRunner<'a> {
    config: &'a PreBuildConfig,
}

impl<'a> PreBuildRunner<'a> {
    pub fn new(config: &'a PreBuildConfig) -> Self {
        PreBuildRunner { config }
    }

    /// Run all configured hooks in declaration order.
    ///
    /// The script, when set, runs before the command list. Blank entries
    /// are skipped. Every hook runs under the configured deadline.
    ///
    /// # Returns
    /// * `Ok(())` if hooks are disabled, or every hook succeeded, or
    ///   failures were downgraded under the lenient policy
    /// * `Err(Hook)` under `fail_on_error` with the first failing command
    pub fn run(&self) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        ui::display_status("Running pre-build hooks...");

        let script = self.config.script.trim();
        if !script.is_empty() {
            println!("Hook script: {}", script);
            self.run_hook(script)?;
        }

        let commands: Vec<&str> = self
            .config
            .commands
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();

        for (idx, command) in commands.iter().enumerate() {
            println!("Hook [{}/{}]: {}", idx + 1, commands.len(), command);
            self.run_hook(command)?;
        }

        ui::display_success("Pre-build hooks finished");
        Ok(())
    }

    /// Run one hook command under the configured deadline.
    ///
    /// Failures abort under `fail_on_error`, otherwise they are reported
    /// as warnings and execution continues.
    fn run_hook(&self, command: &str) -> Result<()> {
        match CommandRunner::run_with_timeout(command, self.config.timeout) {
            Ok(()) => Ok(()),
            Err(e) if self.config.fail_on_error => {
                Err(GhcError::hook(format!("'{}': {}", command, e)))
            }
            Err(e) => {
                ui::display_warning(&format!("hook '{}' failed (continuing): {}", command, e));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook_config(commands: Vec<String>, fail_on_error: bool) -> PreBuildConfig {
        PreBuildConfig {
            enabled: true,
            commands,
            script: String::new(),
            timeout: 10,
            fail_on_error,
        }
    }

    #[test]
    fn test_disabled_hooks_are_a_no_op() {
        let config = PreBuildConfig {
            enabled: false,
            commands: vec!["false".to_string()],
            fail_on_error: true,
            ..PreBuildConfig::default()
        };

        assert!(PreBuildRunner::new(&config).run().is_ok());
    }

    #[test]
    fn test_lenient_policy_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let config = hook_config(
            vec![
                "false".to_string(),
                format!("touch {}", marker.display()),
            ],
            false,
        );

        assert!(PreBuildRunner::new(&config).run().is_ok());
        assert!(marker.exists(), "later hooks should still run");
    }

    #[test]
    fn test_fail_fast_aborts_on_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let config = hook_config(
            vec![
                "false".to_string(),
                format!("touch {}", marker.display()),
            ],
            true,
        );

        let err = PreBuildRunner::new(&config).run().unwrap_err();
        assert!(matches!(err, GhcError::Hook(_)));
        assert!(err.to_string().contains("false"));
        assert!(!marker.exists(), "later hooks must not run after the abort");
    }

    #[test]
    fn test_blank_entries_are_skipped() {
        let config = hook_config(
            vec!["".to_string(), "   ".to_string(), "true".to_string()],
            true,
        );

        assert!(PreBuildRunner::new(&config).run().is_ok());
    }

    #[test]
    fn test_hook_timeout_respects_fail_policy() {
        let mut config = hook_config(vec!["sleep 5".to_string()], true);
        config.timeout = 1;

        let err = PreBuildRunner::new(&config).run().unwrap_err();
        assert!(matches!(err, GhcError::Hook(_)));
        assert!(err.to_string().contains("sleep 5"));
    }

    #[cfg(unix)]
    #[test]
    fn test_script_runs_before_commands() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        let script = dir.path().join("hook.sh");
        std::fs::write(
            &script,
            format!("#!/bin/sh\ntouch {}\n", first.display()),
        )
        .unwrap();
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();

        // cp only succeeds if the script already created its marker
        let config = PreBuildConfig {
            enabled: true,
            commands: vec![format!("cp {} {}", first.display(), second.display())],
            script: script.display().to_string(),
            timeout: 10,
            fail_on_error: true,
        };

        assert!(PreBuildRunner::new(&config).run().is_ok());
        assert!(second.exists());
    }
}
