// crates/hardness-cli/src/config.rs
//! Environment-driven configuration. There are deliberately no baked-in
//! fallback secrets: the admin gate refuses to run without `ADMIN_PASSWORD`.

use hardness_core::error::ConfigError;
use log::info;
use std::env;
use std::path::PathBuf;

pub const AUTH_TOKEN_VAR: &str = "AUTH_TOKEN";
pub const ADMIN_PASSWORD_VAR: &str = "ADMIN_PASSWORD";
pub const FEEDBACK_FILE_VAR: &str = "HARDNESS_FEEDBACK_FILE";

const DEFAULT_FEEDBACK_FILE: &str = "feedback.csv";

/// Bearer token for the reasoning endpoints. The endpoints accept anonymous
/// calls, so absence is allowed but noted.
pub fn auth_token() -> Option<String> {
    match env::var(AUTH_TOKEN_VAR) {
        Ok(token) if !token.trim().is_empty() => Some(token),
        _ => {
            info!("{} not set; calling reasoning endpoints anonymously", AUTH_TOKEN_VAR);
            None
        }
    }
}

/// The admin password is mandatory for any admin command.
pub fn admin_password() -> Result<String, ConfigError> {
    match env::var(ADMIN_PASSWORD_VAR) {
        Ok(password) if !password.is_empty() => Ok(password),
        _ => Err(ConfigError::MissingEnvironment(
            ADMIN_PASSWORD_VAR.to_string(),
        )),
    }
}

pub fn feedback_path() -> PathBuf {
    match env::var(FEEDBACK_FILE_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_FEEDBACK_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; each uses its own variable value
    // and restores nothing because the suite never relies on these vars.

    #[test]
    fn test_missing_admin_password_is_a_config_error() {
        env::remove_var(ADMIN_PASSWORD_VAR);
        assert!(matches!(
            admin_password(),
            Err(ConfigError::MissingEnvironment(_))
        ));
    }

    #[test]
    fn test_feedback_path_default_and_override() {
        env::remove_var(FEEDBACK_FILE_VAR);
        assert_eq!(feedback_path(), PathBuf::from("feedback.csv"));
        env::set_var(FEEDBACK_FILE_VAR, "/tmp/alt.csv");
        assert_eq!(feedback_path(), PathBuf::from("/tmp/alt.csv"));
        env::remove_var(FEEDBACK_FILE_VAR);
    }
}
