//! Repository contents and archive operations

use crate::client::{GitHubClient, check_status};
use crate::error::{RepositoryError, Result};
use crate::types::constants::{ACCEPT_JSON, ACCEPT_RAW};
use crate::types::{ArchiveFormat, FileDeleteOptions, RepositoryContent};
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::debug;
use url::Url;

/// Add `?ref=` unless the reference is empty, which means the default branch
fn with_ref(request: RequestBuilder, reference: &str) -> RequestBuilder {
    if reference.is_empty() {
        request
    } else {
        request.query(&[("ref", reference)])
    }
}

/// Whether a raw contents response is really a JSON directory listing
///
/// The raw media type only applies to files; directories still answer with
/// an `application/json` array.
fn is_directory_listing(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn location(response: &Response, from: &Url) -> Result<Url> {
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            RepositoryError::UnexpectedResponse(format!(
                "{} redirect from {from} without a Location header",
                response.status()
            ))
        })?;
    Ok(from.join(location)?)
}

impl GitHubClient {
    /// Metadata for a single file, including its blob SHA
    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<RepositoryContent> {
        let url = self.endpoint(&["repos", owner, repo, "contents", path])?;
        debug!(%owner, %repo, %path, %reference, "fetching contents");

        let request = with_ref(self.request(Method::GET, url, ACCEPT_JSON), reference);
        let response = check_status(request.send().await?, &format!("{owner}/{repo}/{path}")).await?;

        let body: serde_json::Value = response.json().await?;
        if body.is_array() {
            return Err(RepositoryError::UnexpectedResponse(format!(
                "{path} is a directory, not a file"
            )));
        }
        serde_json::from_value(body).map_err(|e| {
            RepositoryError::UnexpectedResponse(format!("invalid contents response for {path}: {e}"))
        })
    }

    /// Raw bytes of a single file; a directory path is an error
    pub async fn download_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<u8>> {
        let url = self.endpoint(&["repos", owner, repo, "contents", path])?;
        debug!(%owner, %repo, %path, %reference, "downloading contents");

        let request = with_ref(self.request(Method::GET, url, ACCEPT_RAW), reference);
        let response = check_status(request.send().await?, &format!("{owner}/{repo}/{path}")).await?;
        let listing = is_directory_listing(&response);

        let content = response.bytes().await?;
        if listing && serde_json::from_slice::<Vec<serde_json::Value>>(&content).is_ok() {
            return Err(RepositoryError::UnexpectedResponse(format!(
                "{path} is a directory, not a file"
            )));
        }
        Ok(content.to_vec())
    }

    /// Delete a file in its own commit
    ///
    /// When `options.sha` is `None` the blob SHA is looked up on
    /// `options.branch` first, so a missing file surfaces as
    /// [`RepositoryError::NotFound`].
    pub async fn delete_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        options: &FileDeleteOptions,
    ) -> Result<()> {
        let sha = match &options.sha {
            Some(sha) => sha.clone(),
            None => {
                let branch = options.branch.as_deref().unwrap_or_default();
                self.get_contents(owner, repo, path, branch).await?.sha
            }
        };

        let url = self.endpoint(&["repos", owner, repo, "contents", path])?;
        debug!(%owner, %repo, %path, %sha, branch = ?options.branch, "deleting file");

        let payload = FileDeleteOptions {
            sha: Some(sha),
            ..options.clone()
        };
        let response = self
            .request(Method::DELETE, url, ACCEPT_JSON)
            .json(&payload)
            .send()
            .await?;
        check_status(response, &format!("{owner}/{repo}/{path}")).await?;
        Ok(())
    }

    /// Resolve the download link of a repository archive
    ///
    /// GitHub answers `302 Found` with the signed link in `Location`.
    /// `301 Moved Permanently` (renamed repositories) is followed at most
    /// `max_redirects` times.
    pub async fn get_archive_link(
        &self,
        owner: &str,
        repo: &str,
        format: ArchiveFormat,
        reference: &str,
        max_redirects: u8,
    ) -> Result<Url> {
        let mut url = self.endpoint(&["repos", owner, repo, format.as_str(), reference])?;
        let mut redirects_left = max_redirects;

        loop {
            debug!(%owner, %repo, %format, %url, "resolving archive link");
            let response = self.request_no_redirect(Method::GET, url.clone()).send().await?;

            match response.status() {
                StatusCode::FOUND => return location(&response, &url),
                StatusCode::MOVED_PERMANENTLY if redirects_left > 0 => {
                    redirects_left -= 1;
                    url = location(&response, &url)?;
                }
                StatusCode::MOVED_PERMANENTLY => {
                    return Err(RepositoryError::UnexpectedResponse(format!(
                        "exceeded {max_redirects} redirects resolving {format} link for {owner}/{repo}"
                    )));
                }
                status => {
                    check_status(response, &format!("{owner}/{repo} {format}")).await?;
                    return Err(RepositoryError::UnexpectedResponse(format!(
                        "expected a redirect resolving {format} link for {owner}/{repo}, got {status}"
                    )));
                }
            }
        }
    }
}
