use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::Serialize;
use serde_json::Value;
use tokio_util::io::ReaderStream;

use crate::client::error::ClientError;
use crate::models::models::{FileSource, MediaFile};

/// The two payload shapes the client sends.
///
/// `Json(None)` is a bodiless request; it is still encoded as the structured
/// kind.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Option<Value>),
    Multipart(MultipartPayload),
}

impl RequestBody {
    pub fn empty() -> Self {
        RequestBody::Json(None)
    }

    pub fn json<T: Serialize>(value: &T) -> Result<Self, ClientError> {
        Ok(RequestBody::Json(Some(serde_json::to_value(value)?)))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(Some(value))
    }
}

impl From<MultipartPayload> for RequestBody {
    fn from(payload: MultipartPayload) -> Self {
        RequestBody::Multipart(payload)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(MediaFile),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// Multipart form that stays inspectable until the transport turns it into
/// a `reqwest` form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    parts: Vec<FormPart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: MediaFile) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File(file),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::Text(text) if p.name == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn file_value(&self, name: &str) -> Option<&MediaFile> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::File(file) if p.name == name => Some(file),
            _ => None,
        })
    }

    /// Builds the wire form. Files on disk are opened here and streamed, so
    /// their contents are only read while the request is being sent.
    pub async fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part.value {
                PartValue::Text(text) => form.text(part.name, text),
                PartValue::File(file) => form.part(part.name, file_part(file).await?),
            };
        }
        Ok(form)
    }
}

async fn file_part(file: MediaFile) -> Result<Part, ClientError> {
    let mime = file.mime_type();
    let part = match file.source {
        FileSource::Memory(data) => Part::bytes(data.to_vec()),
        FileSource::Path(path) => {
            let handle = tokio::fs::File::open(&path)
                .await
                .map_err(|source| ClientError::FileRead {
                    name: file.name.clone(),
                    source,
                })?;
            Part::stream_with_length(Body::wrap_stream(ReaderStream::new(handle)), file.size)
        }
    };
    Ok(part.file_name(file.name).mime_str(&mime)?)
}
