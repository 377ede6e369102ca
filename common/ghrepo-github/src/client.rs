//! GitHub client implementation
//!
//! `GitHubClient` owns the HTTP connection pools and authentication state.
//! Endpoint groups live in their own modules and extend the client with
//! `impl` blocks:
//! - `git.rs` - references, trees and commits
//! - `repositories.rs` - contents, file deletion and archive links

use crate::auth::GitHubAuth;
use crate::error::{RepositoryError, Result};
use crate::types::constants;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, redirect};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// GitHub REST API client
///
/// Cloning is cheap; clones share connection pools.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    pub(crate) client: Client,
    /// Client that never follows redirects, used to read `Location` headers
    pub(crate) no_redirect: Client,
    pub(crate) auth: Option<GitHubAuth>,
    pub(crate) api_base: Url,
    pub(crate) user_agent: String,
}

/// Builder for [`GitHubClient`]
#[derive(Debug, Default)]
pub struct GitHubClientBuilder {
    token: Option<String>,
    api_base: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl GitHubClientBuilder {
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// API root, e.g. `https://github.example.com/api/v3` for GitHub Enterprise
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Per-request timeout; requests have none unless set
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<GitHubClient> {
        let api_base = Url::parse(
            self.api_base
                .as_deref()
                .unwrap_or(constants::GITHUB_API_BASE),
        )?;
        if api_base.cannot_be_a_base() {
            return Err(RepositoryError::Url(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| constants::DEFAULT_USER_AGENT.to_string());

        let mut client = Client::builder().user_agent(&user_agent);
        let mut no_redirect = Client::builder()
            .user_agent(&user_agent)
            .redirect(redirect::Policy::none());
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
            no_redirect = no_redirect.timeout(timeout);
        }

        Ok(GitHubClient {
            client: client.build()?,
            no_redirect: no_redirect.build()?,
            auth: self.token.map(GitHubAuth::new),
            api_base,
            user_agent,
        })
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GitHubClient {
    /// Create a client for api.github.com with an optional token
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Underlying HTTP client, carrying the configured timeout and User-Agent
    ///
    /// Requests sent through it get no API headers or token, which suits
    /// downloads from resolved archive links.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Build an API URL from path segments
    ///
    /// Each segment may itself contain `/`; it is split so that repository
    /// paths keep their directory structure while other characters are
    /// percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RepositoryError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty();
            for segment in segments {
                path.extend(segment.split('/').filter(|part| !part.is_empty()));
            }
        }
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url, accept: &str) -> RequestBuilder {
        self.authorize(self.client.request(method, url), accept)
    }

    pub(crate) fn request_no_redirect(&self, method: Method, url: Url) -> RequestBuilder {
        self.authorize(
            self.no_redirect.request(method, url),
            constants::ACCEPT_JSON,
        )
    }

    fn authorize(&self, request: RequestBuilder, accept: &str) -> RequestBuilder {
        let mut request = request
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", constants::API_VERSION);

        if let Some(auth) = &self.auth {
            request = request.header(AUTHORIZATION, auth.get_auth_header());
        }
        request
    }
}

/// Map a non-success response to a [`RepositoryError`]
///
/// 404 becomes [`RepositoryError::NotFound`]; any other failure carries the
/// GitHub `message` field, or the raw body when it is not JSON.
pub(crate) async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(RepositoryError::NotFound {
            resource: resource.to_string(),
        });
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    Err(RepositoryError::Api { status, message })
}
