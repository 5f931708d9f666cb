//! Sign-in provider configuration
//!
//! Credentials sign-in is always available. OAuth providers are enabled
//! only when both their client id and secret are configured.

use serde::Serialize;
use std::fmt;

/// OAuth client credentials
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Enabled sign-in providers, built once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthProvidersConfig {
    pub google: Option<OAuthProviderConfig>,
    pub github: Option<OAuthProviderConfig>,
}

/// Public description of one sign-in provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthProvider {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

const CREDENTIALS: AuthProvider = AuthProvider {
    id: "credentials",
    name: "Credentials",
    kind: "credentials",
};

const GOOGLE: AuthProvider = AuthProvider {
    id: "google",
    name: "Google",
    kind: "oauth",
};

const GITHUB: AuthProvider = AuthProvider {
    id: "github",
    name: "GitHub",
    kind: "oauth",
};

impl AuthProvidersConfig {
    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let pair = |id_key: &str, secret_key: &str| {
            let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
            match (non_empty(id_key), non_empty(secret_key)) {
                (Some(client_id), Some(client_secret)) => Some(OAuthProviderConfig {
                    client_id,
                    client_secret,
                }),
                _ => None,
            }
        };

        Self {
            google: pair("GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET"),
            github: pair("GITHUB_CLIENT_ID", "GITHUB_CLIENT_SECRET"),
        }
    }

    /// Providers a client may offer, credentials first
    #[must_use]
    pub fn enabled(&self) -> Vec<AuthProvider> {
        let mut providers = vec![CREDENTIALS];
        if self.google.is_some() {
            providers.push(GOOGLE);
        }
        if self.github.is_some() {
            providers.push(GITHUB);
        }
        providers
    }
}
