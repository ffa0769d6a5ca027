//! File-like entities.
//!
//! These travel by reference: their wire identity is the `file_id` handle,
//! not a numeric id.

use crate::entity::Entity;
use crate::error::MappingResult;
use crate::mapping::FieldSet;
use crate::value::Param;

/// A file ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub file_id: String,
    pub file_size: Option<i64>,
    /// Path to pass to the file download endpoint.
    pub file_path: Option<String>,
}

impl Entity for File {
    const NAME: &'static str = "File";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            file_id: fields.required("file_id")?,
            file_size: fields.optional("file_size")?,
            file_path: fields.optional("file_path")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("file_id", self.file_id.clone().into()),
            ("file_size", self.file_size.into()),
            ("file_path", self.file_path.clone().into()),
        ]
    }
}

/// One size of a photo or a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: i64,
    pub height: i64,
    pub file_size: Option<i64>,
}

impl Entity for PhotoSize {
    const NAME: &'static str = "PhotoSize";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            file_id: fields.required("file_id")?,
            width: fields.required("width")?,
            height: fields.required("height")?,
            file_size: fields.optional("file_size")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("file_id", self.file_id.clone().into()),
            ("width", self.width.into()),
            ("height", self.height.into()),
            ("file_size", self.file_size.into()),
        ]
    }
}

/// A general file (as opposed to photos, voice messages and audio files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_id: String,
    pub thumb: Option<PhotoSize>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
}

impl Document {
    /// Creates a document reference from an existing file handle.
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            thumb: None,
            file_name: None,
            mime_type: None,
            file_size: None,
        }
    }
}

impl Entity for Document {
    const NAME: &'static str = "Document";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            file_id: fields.required("file_id")?,
            thumb: fields.optional_entity("thumb")?,
            file_name: fields.optional("file_name")?,
            mime_type: fields.optional("mime_type")?,
            file_size: fields.optional("file_size")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("file_id", self.file_id.clone().into()),
            ("thumb", self.thumb.clone().into()),
            ("file_name", self.file_name.clone().into()),
            ("mime_type", self.mime_type.clone().into()),
            ("file_size", self.file_size.into()),
        ]
    }
}

/// An audio file treated as music.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audio {
    pub file_id: String,
    /// Duration in seconds.
    pub duration: i64,
    pub performer: Option<String>,
    pub title: Option<String>,
    pub thumb: Option<PhotoSize>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
}

impl Entity for Audio {
    const NAME: &'static str = "Audio";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            file_id: fields.required("file_id")?,
            duration: fields.required("duration")?,
            performer: fields.optional("performer")?,
            title: fields.optional("title")?,
            thumb: fields.optional_entity("thumb")?,
            mime_type: fields.optional("mime_type")?,
            file_size: fields.optional("file_size")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("file_id", self.file_id.clone().into()),
            ("duration", self.duration.into()),
            ("performer", self.performer.clone().into()),
            ("title", self.title.clone().into()),
            ("thumb", self.thumb.clone().into()),
            ("mime_type", self.mime_type.clone().into()),
            ("file_size", self.file_size.into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::mapping::convert;

    #[test]
    fn test_document_with_thumb() {
        let document: Document = convert(json!({
            "file_id": "BQAD",
            "file_name": "notes.txt",
            "thumb": {"file_id": "AAQ", "width": 90, "height": 60},
        }))
        .unwrap();
        assert_eq!(document.file_name.as_deref(), Some("notes.txt"));
        assert_eq!(document.thumb.map(|t| t.width), Some(90));
    }

    #[test]
    fn test_audio_requires_duration() {
        let err = convert::<Audio, _>(json!({"file_id": "CQAD"})).unwrap_err();
        assert_eq!(err.to_string(), "Audio: missing required field `duration`");
    }
}
