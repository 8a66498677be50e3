//! GitHub Gist API access.
//!
//! `GistApi` is the seam the sync logic works against; `GistClient` is the
//! blocking HTTP implementation backed by api.github.com.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};

const API_BASE_URL: &str = "https://api.github.com";

/// A gist as returned by the list endpoint — only the fields the sync logic
/// reads. Gists without a description deserialize with `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Gist {
    pub id: String,
    pub description: Option<String>,
}

/// One file entry of a create/update payload.
#[derive(Debug, Serialize)]
pub struct GistFile {
    pub content: String,
}

/// Payload files keyed by file name.
pub type GistFiles = BTreeMap<String, GistFile>;

/// The remote operations push/pull need. Implemented by `GistClient` and by
/// an in-memory fake in the sync tests.
pub trait GistApi {
    /// All gists visible to the authenticated user.
    fn list(&self) -> Result<Vec<Gist>>;

    /// Create a new secret gist; returns its html URL.
    fn create(&self, description: &str, files: &GistFiles) -> Result<String>;

    /// Replace the files of an existing gist, keeping its description;
    /// returns its html URL.
    fn update(&self, gist: &Gist, files: &GistFiles) -> Result<String>;

    /// File name → content map of the gist with the given id.
    fn content(&self, id: &str) -> Result<BTreeMap<String, String>>;
}

pub struct GistClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct GistUrl {
    html_url: String,
}

#[derive(Deserialize)]
struct GistDetail {
    files: BTreeMap<String, GistDetailFile>,
}

#[derive(Deserialize)]
struct GistDetailFile {
    content: String,
}

impl GistClient {
    /// Build an authenticated client. Pure construction — the token is not
    /// validated until the first request.
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("token {token}"))
                .context("token is not a valid header value")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gist-vimrc/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
        })
    }
}

impl GistApi for GistClient {
    fn list(&self) -> Result<Vec<Gist>> {
        let gists = self
            .http
            .get(format!("{}/gists", self.base_url))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(gists)
    }

    fn create(&self, description: &str, files: &GistFiles) -> Result<String> {
        let body = serde_json::json!({
            "description": description,
            "public": false,
            "files": files,
        });
        let created: GistUrl = self
            .http
            .post(format!("{}/gists", self.base_url))
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(created.html_url)
    }

    fn update(&self, gist: &Gist, files: &GistFiles) -> Result<String> {
        let body = serde_json::json!({
            "description": gist.description,
            "files": files,
        });
        let updated: GistUrl = self
            .http
            .patch(format!("{}/gists/{}", self.base_url, gist.id))
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(updated.html_url)
    }

    fn content(&self, id: &str) -> Result<BTreeMap<String, String>> {
        let detail: GistDetail = self
            .http
            .get(format!("{}/gists/{}", self.base_url, id))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(detail
            .files
            .into_iter()
            .map(|(name, file)| (name, file.content))
            .collect())
    }
}
