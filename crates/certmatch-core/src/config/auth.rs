//! Credential policy configuration.

use serde::{Deserialize, Serialize};

/// Password policy applied when accounts are registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Require at least one letter and one digit.
    #[serde(default = "default_true")]
    pub password_require_mixed: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            password_require_mixed: default_true(),
        }
    }
}

fn default_password_min() -> usize {
    8
}

fn default_true() -> bool {
    true
}
