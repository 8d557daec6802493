use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use url::Url;

/// Cookie the login flow stores the session token under.
pub const SESSION_COOKIE: &str = "session-auth-access";

/// Read-only access to the current session token.
///
/// The client only ever reads through this; whoever logs the user in owns
/// the writes.
pub trait CredentialSource: Send + Sync {
    fn current_token(&self) -> Option<String>;
}

/// Looks the token up by name in the cookie jar shared with the HTTP client.
#[derive(Debug, Clone)]
pub struct CookieCredentials {
    jar: Arc<Jar>,
    origin: Url,
}

impl CookieCredentials {
    pub fn new(jar: Arc<Jar>, origin: Url) -> Self {
        Self { jar, origin }
    }
}

impl CredentialSource for CookieCredentials {
    fn current_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.origin)?;
        let raw = header.to_str().ok()?;
        cookie_value(raw, SESSION_COOKIE)
    }
}

/// Finds `name` in a `Cookie` header value (`a=1; b=2`).
fn cookie_value(raw: &str, name: &str) -> Option<String> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// In-memory token slot, for callers that manage the session themselves.
#[derive(Debug, Clone, Default)]
pub struct SharedCredentials {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

impl CredentialSource for SharedCredentials {
    fn current_token(&self) -> Option<String> {
        self.token.read().clone()
    }
}
