//! Hetzner Cloud API client
//!
//! Direct REST implementation over the servers, images, and actions
//! endpoints. Uses Bearer token authentication.

use crate::error::{HcloudError, Result};
use crate::model::{Action, Server, Snapshot};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Public API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.hetzner.cloud/v1";

const IMAGES_PER_PAGE: u32 = 50;

/// Hetzner Cloud API client
pub struct HcloudClient {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl HcloudClient {
    /// Create a client against the public API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (API-compatible mocks).
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// List all servers in the project, sorted by name.
    pub async fn list_servers(&self) -> Result<Vec<Server>> {
        let url = format!("{}/servers", self.endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let body: ServersResponse = Self::read_json(response).await?;
        let mut servers = body.servers;
        servers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(servers)
    }

    /// List the snapshots associated with `server`, newest first.
    ///
    /// The API only exposes a global image listing, so every snapshot
    /// page is fetched and filtered with [`Snapshot::belongs_to`].
    pub async fn list_snapshots(&self, server: &Server) -> Result<Vec<Snapshot>> {
        let mut images = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!(
                "{}/images?type=snapshot&per_page={}&page={}",
                self.endpoint, IMAGES_PER_PAGE, page
            );
            tracing::debug!("GET {}", url);

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let body: ImagesResponse = Self::read_json(response).await?;
            images.extend(body.images);

            let last_page = body
                .meta
                .and_then(|m| m.pagination)
                .and_then(|p| p.last_page)
                .unwrap_or(page);
            if page >= last_page {
                break;
            }
            page += 1;
        }

        let mut snapshots: Vec<Snapshot> = images
            .into_iter()
            .filter(|snapshot| snapshot.belongs_to(server))
            .collect();
        snapshots.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(snapshots)
    }

    /// Request a new snapshot of a server. Returns the action tracking
    /// the image creation on the provider side.
    pub async fn create_snapshot(&self, server_id: u64, description: &str) -> Result<Action> {
        let url = format!("{}/servers/{}/actions/create_image", self.endpoint, server_id);
        tracing::debug!("POST {}", url);

        let request_body = CreateImageRequest {
            description: description.to_string(),
            image_type: "snapshot".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request_body)
            .send()
            .await?;

        let body: CreateImageResponse = Self::read_json(response).await?;
        Ok(body.action)
    }

    /// Delete a snapshot image. The API answers 204 No Content.
    pub async fn delete_snapshot(&self, snapshot_id: u64) -> Result<()> {
        let url = format!("{}/images/{}", self.endpoint, snapshot_id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_error(status, &body))
    }

    /// Fetch the current state of an action.
    pub async fn get_action(&self, action_id: u64) -> Result<Action> {
        let url = format!("{}/actions/{}", self.endpoint, action_id);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let body: ActionResponse = Self::read_json(response).await?;
        Ok(body.action)
    }

    /// Decode a successful response, or map the status and error body
    /// to a typed error.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_error(status, &body))
    }

    fn map_error(status: StatusCode, body: &str) -> HcloudError {
        let detail = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|b| b.error);
        let message = detail
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| status.to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HcloudError::Auth(message),
            StatusCode::NOT_FOUND => HcloudError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => HcloudError::RateLimited(message),
            _ => HcloudError::Api {
                code: detail
                    .map(|e| e.code)
                    .unwrap_or_else(|| status.as_u16().to_string()),
                message,
            },
        }
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ServersResponse {
    servers: Vec<Server>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    images: Vec<Snapshot>,
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    last_page: Option<u32>,
}

#[derive(Debug, Serialize)]
struct CreateImageRequest {
    description: String,
    #[serde(rename = "type")]
    image_type: String,
}

#[derive(Debug, Deserialize)]
struct CreateImageResponse {
    action: Action,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    action: Action,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: String,
    message: String,
}
