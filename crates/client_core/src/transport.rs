use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Response};
use shared::{
    domain::PostId,
    error::ApiError,
    protocol::{DeletedPost, Post, PostFields},
};
use url::Url;

use crate::{config::ClientSettings, error::SettingsError, PostsApi};

const JSON: &str = "application/json";

/// `PostsApi` over HTTP with JSON bodies.
pub struct HttpPostsApi {
    http: Client,
    endpoint: Url,
}

impl HttpPostsApi {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn from_settings(settings: &ClientSettings) -> std::result::Result<Self, SettingsError> {
        let endpoint = settings.endpoint_url()?;
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn item_url(&self, id: &PostId) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("posts endpoint '{}' cannot carry an id", self.endpoint))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => Err(anyhow!("server returned {status}: {}", api_error.message)),
        Err(_) => Err(anyhow!("server returned {status}")),
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(ACCEPT, JSON)
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.endpoint))?;
        ensure_success(response)
            .await?
            .json()
            .await
            .context("invalid post list in response")
    }

    async fn create_post(&self, fields: &PostFields) -> Result<Post> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, JSON)
            .json(fields)
            .send()
            .await
            .with_context(|| format!("POST {} failed", self.endpoint))?;
        ensure_success(response)
            .await?
            .json()
            .await
            .context("invalid created post in response")
    }

    async fn update_post(&self, post: &Post) -> Result<Post> {
        let url = self.item_url(&post.id)?;
        let response = self
            .http
            .put(url.clone())
            .header(ACCEPT, JSON)
            .json(post)
            .send()
            .await
            .with_context(|| format!("PUT {url} failed"))?;
        ensure_success(response)
            .await?
            .json()
            .await
            .context("invalid updated post in response")
    }

    async fn delete_post(&self, id: &PostId) -> Result<DeletedPost> {
        let url = self.item_url(id)?;
        let response = self
            .http
            .delete(url.clone())
            .header(ACCEPT, JSON)
            .send()
            .await
            .with_context(|| format!("DELETE {url} failed"))?;
        let bytes = ensure_success(response).await?.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(DeletedPost::Other(serde_json::Value::Null));
        }
        serde_json::from_slice(&bytes).context("invalid delete response body")
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
