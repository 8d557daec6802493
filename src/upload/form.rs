use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::client::body::MultipartPayload;
use crate::models::models::MediaFile;
use crate::utils::utils::format_file_size;

/// Multipart field names the upload endpoint expects.
pub const TITLE_FIELD: &str = "title";
pub const DESCRIPTION_FIELD: &str = "description";
pub const VIDEO_FIELD: &str = "videoFile";
pub const THUMBNAIL_FIELD: &str = "thumbnail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Video,
    Thumbnail,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Video => "video file",
            DraftField::Thumbnail => "thumbnail",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill all fields and select both video and thumbnail")]
    IncompleteDraft { missing: Vec<DraftField> },
}

/// In-progress upload form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadDraft {
    pub title: String,
    pub description: String,
    pub video: Option<MediaFile>,
    pub thumbnail: Option<MediaFile>,
}

impl UploadDraft {
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(DraftField::Title);
        }
        if self.description.trim().is_empty() {
            missing.push(DraftField::Description);
        }
        if self.video.is_none() {
            missing.push(DraftField::Video);
        }
        if self.thumbnail.is_none() {
            missing.push(DraftField::Thumbnail);
        }
        missing
    }

    pub fn is_submittable(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Collects the upload fields and hands a complete multipart payload to the
/// caller. It never talks to the network itself.
#[derive(Debug, Default)]
pub struct UploadFormController {
    draft: UploadDraft,
}

impl UploadFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_video(&mut self, file: Option<MediaFile>) {
        self.draft.video = file;
    }

    pub fn set_thumbnail(&mut self, file: Option<MediaFile>) {
        self.draft.thumbnail = file;
    }

    /// `"clip.mp4 (1.5 MB)"` for the currently selected video.
    pub fn selected_video_label(&self) -> Option<String> {
        self.draft
            .video
            .as_ref()
            .map(|v| format!("{} ({})", v.name, format_file_size(v.size)))
    }

    pub fn selected_thumbnail_label(&self) -> Option<String> {
        self.draft.thumbnail.as_ref().map(|t| t.name.clone())
    }

    /// Validates the draft and, if complete, calls `handler` once with the
    /// payload, the video's file name and its display size, then clears the
    /// form. An incomplete draft is left untouched and `handler` is not
    /// called.
    pub fn submit<F>(&mut self, handler: F) -> Result<(), ValidationError>
    where
        F: FnOnce(MultipartPayload, String, String),
    {
        let missing = self.draft.missing_fields();
        let (true, Some(video), Some(thumbnail)) =
            (missing.is_empty(), &self.draft.video, &self.draft.thumbnail)
        else {
            return Err(ValidationError::IncompleteDraft { missing });
        };

        let video_name = video.name.clone();
        let video_size = format_file_size(video.size);
        let payload = MultipartPayload::new()
            .text(TITLE_FIELD, self.draft.title.trim())
            .text(DESCRIPTION_FIELD, self.draft.description.trim())
            .file(VIDEO_FIELD, video.clone())
            .file(THUMBNAIL_FIELD, thumbnail.clone());

        info!("Submitting upload of {video_name} ({video_size})");
        handler(payload, video_name, video_size);
        self.draft = UploadDraft::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::body::PartValue;

    fn video() -> MediaFile {
        MediaFile::from_bytes("holiday.mp4", vec![0u8; 1536])
    }

    fn thumbnail() -> MediaFile {
        MediaFile::from_bytes("cover.png", vec![0u8; 10])
    }

    fn filled() -> UploadFormController {
        let mut form = UploadFormController::new();
        form.set_title("  Holiday  ");
        form.set_description("\tBeach day\n");
        form.set_video(Some(video()));
        form.set_thumbnail(Some(thumbnail()));
        form
    }

    #[test]
    fn incomplete_drafts_never_reach_the_handler() {
        let cases: [(fn(&mut UploadFormController), DraftField); 4] = [
            (|f| f.set_title("   "), DraftField::Title),
            (|f| f.set_description(""), DraftField::Description),
            (|f| f.set_video(None), DraftField::Video),
            (|f| f.set_thumbnail(None), DraftField::Thumbnail),
        ];

        for (break_field, expected) in cases {
            let mut form = filled();
            break_field(&mut form);
            let before = form.draft().clone();

            let mut calls = 0;
            let result = form.submit(|_, _, _| calls += 1);

            assert_eq!(
                result,
                Err(ValidationError::IncompleteDraft {
                    missing: vec![expected]
                })
            );
            assert_eq!(calls, 0);
            assert_eq!(form.draft(), &before);
        }
    }

    #[test]
    fn empty_form_reports_every_missing_field() {
        let mut form = UploadFormController::new();
        let err = form.submit(|_, _, _| panic!("must not submit")).unwrap_err();
        let ValidationError::IncompleteDraft { missing } = err;
        assert_eq!(missing.len(), 4);
        assert_eq!(
            ValidationError::IncompleteDraft { missing }.to_string(),
            "Please fill all fields and select both video and thumbnail"
        );
    }

    #[test]
    fn valid_draft_is_handed_off_once_and_reset() {
        let mut form = filled();
        let mut calls = Vec::new();

        form.submit(|payload, name, size| calls.push((payload, name, size)))
            .unwrap();

        assert_eq!(calls.len(), 1);
        let (payload, name, size) = &calls[0];
        assert_eq!(name, "holiday.mp4");
        assert_eq!(size, "1.5 KB");
        assert_eq!(
            payload.part_names(),
            vec![TITLE_FIELD, DESCRIPTION_FIELD, VIDEO_FIELD, THUMBNAIL_FIELD]
        );
        assert_eq!(payload.text_value("title"), Some("Holiday"));
        assert_eq!(payload.text_value("description"), Some("Beach day"));
        assert_eq!(payload.file_value("videoFile"), Some(&video()));
        assert!(matches!(
            &payload.parts()[3].value,
            PartValue::File(f) if f.name == "cover.png"
        ));

        assert_eq!(form.draft(), &UploadDraft::default());
        assert!(!form.draft().is_submittable());
    }

    #[test]
    fn selection_labels() {
        let mut form = UploadFormController::new();
        assert_eq!(form.selected_video_label(), None);

        form.set_video(Some(video()));
        form.set_thumbnail(Some(thumbnail()));
        assert_eq!(form.selected_video_label().as_deref(), Some("holiday.mp4 (1.5 KB)"));
        assert_eq!(form.selected_thumbnail_label().as_deref(), Some("cover.png"));
    }
}
