use thiserror::Error;

use crate::core::commands::CommandDefinition;

/// Why a command invocation was refused. The display text is sent back to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("This is a dev-only command.")]
    DevOnly,
    #[error("This is a test-only command.")]
    TestOnly,
}

/// Gatekeeping for dev-only and test-only commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    pub dev_id: Option<u64>,
    pub test_guild_id: Option<u64>,
}

impl AccessPolicy {
    pub fn new(dev_id: Option<u64>, test_guild_id: Option<u64>) -> Self {
        Self {
            dev_id,
            test_guild_id,
        }
    }

    /// Dev-only is checked before test-only. With nothing configured,
    /// restricted commands are refused for everyone.
    pub fn check(
        &self,
        command: &CommandDefinition,
        user_id: u64,
        guild_id: u64,
    ) -> Result<(), AccessDenied> {
        if command.dev_only && self.dev_id != Some(user_id) {
            return Err(AccessDenied::DevOnly);
        }

        if command.test_only && self.test_guild_id != Some(guild_id) {
            return Err(AccessDenied::TestOnly);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV: u64 = 42;
    const TEST_GUILD: u64 = 900;

    fn policy() -> AccessPolicy {
        AccessPolicy::new(Some(DEV), Some(TEST_GUILD))
    }

    #[test]
    fn test_unrestricted_command_is_allowed() {
        let command = CommandDefinition::new("ping", "ping the bot");
        assert_eq!(policy().check(&command, 1, 2), Ok(()));
        assert_eq!(AccessPolicy::default().check(&command, 1, 2), Ok(()));
    }

    #[test]
    fn test_dev_only() {
        let command = CommandDefinition::new("reload", "dev tools").dev_only();

        assert_eq!(policy().check(&command, DEV, 2), Ok(()));
        assert_eq!(policy().check(&command, 7, 2), Err(AccessDenied::DevOnly));
        assert_eq!(
            AccessPolicy::default().check(&command, DEV, 2),
            Err(AccessDenied::DevOnly)
        );
    }

    #[test]
    fn test_test_only() {
        let command = CommandDefinition::new("beta", "beta feature").test_only();

        assert_eq!(policy().check(&command, 1, TEST_GUILD), Ok(()));
        assert_eq!(policy().check(&command, 1, 5), Err(AccessDenied::TestOnly));
    }

    #[test]
    fn test_dev_check_runs_first() {
        let command = CommandDefinition::new("both", "locked down")
            .dev_only()
            .test_only();

        assert_eq!(policy().check(&command, 7, 5), Err(AccessDenied::DevOnly));
        assert_eq!(policy().check(&command, DEV, 5), Err(AccessDenied::TestOnly));
        assert_eq!(policy().check(&command, DEV, TEST_GUILD), Ok(()));
    }

    #[test]
    fn test_denial_text() {
        assert_eq!(AccessDenied::DevOnly.to_string(), "This is a dev-only command.");
        assert_eq!(AccessDenied::TestOnly.to_string(), "This is a test-only command.");
    }
}
