// msgview - A terminal viewer for very large chat-message archives
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};

use crate::calendar::Timestamped;
use crate::source::decode::decode_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

/// Photo, video or audio attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub uri: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Share {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content_owner: Option<String>,
}

/// One message as it appears in an export.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    pub sender_name: String,
    pub timestamp_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub is_geoblocked_for_viewer: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Media>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Media>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio_files: Vec<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<Share>,
}

impl Message {
    /// Decoded text content, empty when the message has none.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.as_deref().map(|c| decode_text(c).into_owned()).unwrap_or_default()
    }

    #[must_use]
    pub fn sender(&self) -> String {
        decode_text(&self.sender_name).into_owned()
    }

    #[must_use]
    pub fn share_link(&self) -> Option<&str> {
        self.share.as_ref().and_then(|s| s.link.as_deref()).filter(|l| !l.is_empty())
    }

    #[must_use]
    pub fn has_media(&self) -> bool {
        !self.photos.is_empty() || !self.videos.is_empty() || !self.audio_files.is_empty()
    }
}

impl Timestamped for Message {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thread_path: String,
    #[serde(default)]
    pub is_still_participant: bool,
    #[serde(default)]
    pub magic_words: Vec<String>,
}

impl Conversation {
    /// Decoded title, falling back to the participant names.
    #[must_use]
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            let names: Vec<_> =
                self.participants.iter().map(|p| decode_text(&p.name).into_owned()).collect();
            if names.is_empty() { "(untitled)".to_owned() } else { names.join(", ") }
        } else {
            decode_text(&self.title).into_owned()
        }
    }

    #[must_use]
    pub fn latest_timestamp_ms(&self) -> Option<i64> {
        self.messages.iter().map(|m| m.timestamp_ms).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_message() {
        let msg: Message = serde_json::from_value(serde_json::json!({
            "sender_name": "Ana",
            "timestamp_ms": 1_614_816_000_000_i64,
            "type": "Generic",
            "photos": [{"uri": "photos/1.jpg"}]
        }))
        .expect("valid message");
        assert_eq!(msg.kind.as_deref(), Some("Generic"));
        assert_eq!(msg.photos.len(), 1);
        assert!(msg.has_media());
        assert_eq!(msg.text(), "");
        assert!(msg.share_link().is_none());
    }

    #[test]
    fn title_falls_back_to_participants() {
        let conv: Conversation = serde_json::from_value(serde_json::json!({
            "participants": [{"name": "Ana"}, {"name": "Bo"}],
            "messages": []
        }))
        .expect("valid conversation");
        assert_eq!(conv.display_title(), "Ana, Bo");
        assert_eq!(conv.latest_timestamp_ms(), None);
    }

    #[test]
    fn empty_share_link_is_ignored() {
        let msg: Message = serde_json::from_value(serde_json::json!({
            "sender_name": "Ana",
            "timestamp_ms": 1,
            "share": {"link": ""}
        }))
        .expect("valid message");
        assert!(msg.share_link().is_none());
    }
}
