use std::fmt::Display;

use base64::Engine;

/// Spotify app client id and secret
///
/// Displays as the base64 `client_id:client_secret` pair used for basic auth against the token
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) id: String,
    pub(crate) secret: String,
}

impl Credentials {
    /// Create credentials from a client ID and a client secret
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            id: client_id.to_string(),
            secret: client_secret.to_string(),
        }
    }
}

impl Display for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = format!("{}:{}", self.id, self.secret);
        write!(f, "{}", base64::engine::general_purpose::STANDARD.encode(auth.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_basic_auth_pair() {
        // base64("client:secret")
        assert_eq!(Credentials::new("client", "secret").to_string(), "Y2xpZW50OnNlY3JldA==");
    }
}
