use serde_json::Value;
use tracing::{debug, info};

use crate::client::body::MultipartPayload;
use crate::client::client::AuthenticatedClient;
use crate::client::error::ClientError;
use crate::client::transport::{ReqwestTransport, Transport};
use crate::media::normalizer::normalize_all;
use crate::models::models::VideoCard;

pub const VIDEOS_PATH: &str = "/videos";
pub const WATCH_HISTORY_PATH: &str = "/users/history";

/// Video endpoints of the platform API.
pub struct VideoApi<T = ReqwestTransport> {
    client: AuthenticatedClient<T>,
}

impl<T: Transport> VideoApi<T> {
    pub fn new(client: AuthenticatedClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthenticatedClient<T> {
        &self.client
    }

    /// Publishes an upload built by the upload form. Returns the server's
    /// response body as is.
    pub async fn publish_video(&self, payload: MultipartPayload) -> Result<Value, ClientError> {
        let resp = self.client.post(VIDEOS_PATH, payload).await?;
        info!("Upload accepted with status {}", resp.status);
        resp.json()
    }

    pub async fn list_videos(&self) -> Result<Vec<VideoCard>, ClientError> {
        self.fetch_cards(VIDEOS_PATH).await
    }

    pub async fn watch_history(&self) -> Result<Vec<VideoCard>, ClientError> {
        self.fetch_cards(WATCH_HISTORY_PATH).await
    }

    async fn fetch_cards(&self, path: &str) -> Result<Vec<VideoCard>, ClientError> {
        let body: Value = self.client.get(path).await?.json()?;
        let records = video_records(&body);
        let cards = normalize_all(records);
        debug!("{path}: {} records, {} renderable", records.len(), cards.len());
        Ok(cards)
    }
}

/// Finds the record list in a listing response: a bare array, `data`,
/// or a paginated `data.docs` / `data.videos`.
pub fn video_records(body: &Value) -> &[Value] {
    let candidates = [
        Some(body),
        body.get("data"),
        body.pointer("/data/docs"),
        body.pointer("/data/videos"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
