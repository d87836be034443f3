// ABOUTME: Session identity and user-scoped preferences
// ABOUTME: ProfileSession answers from the profile file, falling back to the login environment

use std::collections::HashMap;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{JobstatError, Result};

/// Preference key holding a saved comma separated column list.
pub const FIELDS_PREFERENCE: &str = "jobstat_fields";

pub trait Session: Send + Sync {
    fn current_user_name(&self) -> Result<String>;

    fn preference(&self, key: &str, default: &str) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct ProfileSession {
    user: Option<String>,
    preferences: HashMap<String, String>,
}

impl ProfileSession {
    pub fn new(user: Option<String>, preferences: HashMap<String, String>) -> Self {
        Self { user, preferences }
    }

    /// Profile user first, then `USER`, then `LOGNAME`.
    pub fn from_config(config: &CliConfig) -> Self {
        let user = config
            .session
            .user
            .clone()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| std::env::var("USER").ok().filter(|u| !u.is_empty()))
            .or_else(|| std::env::var("LOGNAME").ok().filter(|u| !u.is_empty()));

        debug!("Session user: {:?}", user);
        Self::new(user, config.preferences.clone())
    }
}

impl Session for ProfileSession {
    fn current_user_name(&self) -> Result<String> {
        self.user.clone().ok_or_else(|| {
            JobstatError::IdentityResolution(
                "no user in profile [session] section and neither USER nor LOGNAME is set"
                    .to_string(),
            )
        })
    }

    fn preference(&self, key: &str, default: &str) -> String {
        self.preferences
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}
