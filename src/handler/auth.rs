//! Authentication parameters handed to platform handlers.

use serde::{Deserialize, Serialize};

/// Credentials and app registration details for a platform.
///
/// Every field is optional and nothing here is validated: which fields a
/// handler needs (and whether they are any good) is its own business.  The
/// manager only passes this through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthParams {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "name_app")]
    pub app_name: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub access_token: Option<String>,
}

impl AuthParams {
    /// Parameters carrying only a bearer token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// The access token, if present and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
