//! Credential resolution for the remote table
//!
//! Command-line values win over the environment. Empty values count as unset.

use crate::upload::UploadError;
use std::fmt;

/// Environment variables consulted for the project URL, in order
pub const URL_VARS: &[&str] = &["SUPABASE_URL", "VITE_SUPABASE_URL"];

/// Environment variables consulted for the service key, in order
pub const KEY_VARS: &[&str] = &["SUPABASE_SERVICE_ROLE", "SUPABASE_SERVICE_ROLE_KEY"];

/// Project URL and service key for the table endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolves credentials from overrides, then the process environment
    pub fn resolve(url: Option<String>, key: Option<String>) -> Result<Self, UploadError> {
        Self::resolve_with(url, key, |name| std::env::var(name).ok())
    }

    /// Resolves credentials using `lookup` in place of the environment
    pub fn resolve_with<F>(
        url: Option<String>,
        key: Option<String>,
        lookup: F,
    ) -> Result<Self, UploadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |value: Option<String>, vars: &[&str]| {
            value
                .filter(|v| !v.trim().is_empty())
                .or_else(|| {
                    vars.iter()
                        .filter_map(|name| lookup(*name))
                        .find(|v| !v.trim().is_empty())
                })
        };

        match (pick(url, URL_VARS), pick(key, KEY_VARS)) {
            (Some(url), Some(key)) => Ok(Self { url, key }),
            _ => Err(UploadError::CredentialMissing(missing_message())),
        }
    }
}

fn missing_message() -> String {
    format!(
        "Set {} and {} in your environment or .env, or pass --url and --key.\n\
         Example:\n  \
         export SUPABASE_URL=https://<project>.supabase.co\n  \
         export SUPABASE_SERVICE_ROLE=<service_role_key>\n  \
         course-harvest upload --file dtu_courses.json",
        URL_VARS[0], KEY_VARS[0]
    )
}
