use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::cookie::Jar;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::client::body::RequestBody;
use crate::client::error::ClientError;

/// Fully prepared request: headers already reflect credential and encoding.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub path: String,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// The network boundary. Implementations send the request as given and
/// report non-success statuses as [`ClientError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: OutgoingRequest) -> Result<ApiResponse, ClientError>;
}

/// `reqwest` transport. Cookies from the shared jar go out with every
/// request; there is no retry and no client-side timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(jar: Arc<Jar>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_provider(jar).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<ApiResponse, ClientError> {
        let OutgoingRequest {
            method,
            path,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.http.request(method, url).headers(headers);
        builder = match body {
            RequestBody::Json(Some(value)) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Json(None) => builder,
            RequestBody::Multipart(payload) => builder.multipart(payload.into_form().await?),
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        if !status.is_success() {
            warn!("Request to {path} failed with status: {status}");
            return Err(ClientError::Status { status, body });
        }

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
