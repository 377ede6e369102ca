//! Token authentication for GitHub API requests

/// A GitHub personal access token
#[derive(Clone)]
pub struct GitHubAuth {
    token: String,
}

impl GitHubAuth {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn get_auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for GitHubAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}
