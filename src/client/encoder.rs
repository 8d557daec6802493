use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::client::body::RequestBody;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Sets the content type for `body` on `headers`.
///
/// Multipart bodies must go out without an explicit content type: the
/// transport writes `multipart/form-data; boundary=...` itself and a header
/// set here would carry the wrong boundary.
pub fn encode_headers(body: &RequestBody, headers: &mut HeaderMap) {
    match body {
        RequestBody::Json(_) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        RequestBody::Multipart(_) => {
            headers.remove(CONTENT_TYPE);
        }
    }
}
