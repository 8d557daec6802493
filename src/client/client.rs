use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::auth::credentials::CredentialSource;
use crate::client::body::RequestBody;
use crate::client::encoder::encode_headers;
use crate::client::error::ClientError;
use crate::client::transport::{ApiResponse, OutgoingRequest, ReqwestTransport, Transport};
use crate::config::config::Config;

/// HTTP client bound to one API base that signs every request with the
/// current session token.
pub struct AuthenticatedClient<T = ReqwestTransport> {
    api_base: String,
    credentials: Arc<dyn CredentialSource>,
    transport: T,
}

impl AuthenticatedClient<ReqwestTransport> {
    /// Client over `reqwest`, sharing `jar` so session cookies travel with
    /// each request.
    pub fn from_config(
        config: &Config,
        credentials: Arc<dyn CredentialSource>,
        jar: Arc<Jar>,
    ) -> Result<Self, ClientError> {
        Ok(Self::new(
            config.api_base(),
            credentials,
            ReqwestTransport::new(jar)?,
        ))
    }
}

impl<T: Transport> AuthenticatedClient<T> {
    pub fn new(api_base: impl Into<String>, credentials: Arc<dyn CredentialSource>, transport: T) -> Self {
        Self {
            api_base: api_base.into(),
            credentials,
            transport,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Builds the request descriptor without sending it.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<OutgoingRequest, ClientError> {
        let url = self.resolve(path)?;
        let mut headers = HeaderMap::new();

        // An empty cookie counts as logged out.
        if let Some(token) = self.credentials.current_token().filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Session token is not a valid header value, sending unauthenticated"),
            }
        }

        encode_headers(&body, &mut headers);

        Ok(OutgoingRequest {
            method,
            path: path.to_string(),
            url,
            headers,
            body,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        let request = self.prepare(method, path, body)?;
        debug!(
            request_id = %Uuid::new_v4(),
            method = %request.method,
            path = %request.path,
            authenticated = request.headers.contains_key(AUTHORIZATION),
            multipart = request.body.is_multipart(),
            "Sending request"
        );
        self.transport.execute(request).await
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.request(Method::GET, path, RequestBody::empty()).await
    }

    pub async fn post(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse, ClientError> {
        self.request(Method::POST, path, body.into()).await
    }

    pub async fn patch(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse, ClientError> {
        self.request(Method::PATCH, path, body.into()).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.request(Method::DELETE, path, RequestBody::empty()).await
    }

    /// Joins `path` onto the API base with exactly one slash.
    fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|source| ClientError::InvalidUrl {
            url: joined,
            source,
        })
    }
}
