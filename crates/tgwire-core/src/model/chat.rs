//! Chats and chat actions.

use crate::entity::{Entity, Rename};
use crate::error::MappingResult;
use crate::mapping::FieldSet;
use crate::value::Param;

/// A private chat, group, supergroup or channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    /// Unique identifier.
    pub id: i64,
    /// Chat type (`private`, `group`, `supergroup` or `channel`).
    pub kind: String,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub all_members_are_administrators: Option<bool>,
}

impl Chat {
    /// Creates a chat with only the required fields set.
    pub fn new(id: i64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            title: None,
            username: None,
            first_name: None,
            last_name: None,
            description: None,
            all_members_are_administrators: None,
        }
    }
}

impl Entity for Chat {
    const NAME: &'static str = "Chat";
    const RENAMES: &'static [(&'static str, Rename)] = &[("type", Rename::To("kind"))];

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            id: fields.required("id")?,
            kind: fields.required("kind")?,
            title: fields.optional("title")?,
            username: fields.optional("username")?,
            first_name: fields.optional("first_name")?,
            last_name: fields.optional("last_name")?,
            description: fields.optional("description")?,
            all_members_are_administrators: fields.optional("all_members_are_administrators")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("id", self.id.into()),
            ("kind", self.kind.clone().into()),
            ("title", self.title.clone().into()),
            ("username", self.username.clone().into()),
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("description", self.description.clone().into()),
            (
                "all_members_are_administrators",
                self.all_members_are_administrators.into(),
            ),
        ]
    }
}

wire_enum! {
    /// What the bot is about to do, shown to the chat's members.
    pub enum ChatAction {
        /// For text messages.
        Typing => "typing",
        /// For photos.
        UploadPhoto => "upload_photo",
        RecordVideo => "record_video",
        UploadVideo => "upload_video",
        RecordAudio => "record_audio",
        UploadAudio => "upload_audio",
        /// For general files.
        UploadDocument => "upload_document",
        /// For location data.
        FindLocation => "find_location",
        RecordVideoNote => "record_video_note",
        UploadVideoNote => "upload_video_note",
    }
}
