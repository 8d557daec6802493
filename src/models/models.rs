use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::age::time_ago;

/// Where the bytes of a [`MediaFile`] live until the transport reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Bytes),
}

/// A user-selected file: name and size are known up front, contents are read
/// lazily when the request is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub name: String,
    pub size: u64,
    pub source: FileSource,
}

impl MediaFile {
    /// Picks up name and size from disk without reading the contents.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            size: meta.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            size: data.len() as u64,
            source: FileSource::Memory(data),
        }
    }

    /// MIME type guessed from the file name.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// Render-ready projection of a server video record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub duration_seconds: u64,
    /// `m:ss`
    pub duration_label: String,
    pub views: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub owner: Option<OwnerCard>,
    /// Empty when the record carries no usable thumbnail.
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerCard {
    pub id: Option<String>,
    pub username: Option<String>,
    pub avatar_url: String,
}

impl VideoCard {
    pub fn watch_path(&self) -> String {
        format!("/watch/{}", self.id)
    }

    pub fn thumbnail_alt(&self) -> &str {
        if self.title.is_empty() {
            "Video thumbnail"
        } else {
            &self.title
        }
    }

    /// Relative age such as `"3 days"`, if the record had a timestamp.
    pub fn age_label(&self, now: DateTime<Utc>) -> Option<String> {
        self.created_at.map(|created| time_ago(created, now))
    }

    /// `"<views> Views, <age> Ago"`
    pub fn summary_line(&self, now: DateTime<Utc>) -> String {
        format!(
            "{} Views, {} Ago",
            self.views,
            self.age_label(now).unwrap_or_default()
        )
    }
}

impl OwnerCard {
    /// `None` for unpopulated owners that carry no id.
    pub fn channel_path(&self) -> Option<String> {
        self.id.as_ref().map(|id| format!("/channel/{id}"))
    }
}

/// How a consumer lays out a card. History listings hide the
/// views/age/owner line but use the same projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardMode {
    #[default]
    Standard,
    History,
}

impl CardMode {
    pub fn shows_details(self) -> bool {
        matches!(self, CardMode::Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn card() -> VideoCard {
        VideoCard {
            id: "v1".into(),
            title: String::new(),
            duration_seconds: 0,
            duration_label: "0:00".into(),
            views: 12,
            created_at: None,
            owner: None,
            thumbnail_url: String::new(),
        }
    }

    #[test]
    fn untitled_cards_fall_back_to_generic_alt_text() {
        let mut card = card();
        assert_eq!(card.thumbnail_alt(), "Video thumbnail");
        card.title = "Sunset".into();
        assert_eq!(card.thumbnail_alt(), "Sunset");
        assert_eq!(card.watch_path(), "/watch/v1");
    }

    #[test]
    fn summary_line_uses_relative_age() {
        let now = Utc::now();
        let mut card = card();
        card.created_at = Some(now - Duration::days(3));
        assert_eq!(card.summary_line(now), "12 Views, 3 days Ago");
    }

    #[test]
    fn history_mode_hides_details() {
        assert!(CardMode::Standard.shows_details());
        assert!(!CardMode::History.shows_details());
    }

    #[test]
    fn in_memory_files_report_their_length_and_mime() {
        let file = MediaFile::from_bytes("clip.mp4", vec![0u8; 2048]);
        assert_eq!(file.size, 2048);
        assert_eq!(file.mime_type(), "video/mp4");
        let unknown = MediaFile::from_bytes("blob", Vec::<u8>::new());
        assert_eq!(unknown.mime_type(), "application/octet-stream");
    }
}
