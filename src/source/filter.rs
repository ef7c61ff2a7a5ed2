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

use std::sync::Arc;

use super::decode::decode_text;
use super::model::{Conversation, Message};

/// Reaction notices, lowercased with single spaces.
const REACTION_PHRASES: &[&str] = &[
    "liked this message",
    "reacted to",
    "ಸಂದೇಶವನ್ನು ಇಷ್ಟಪಟ್ಟಿದ್ದಾರೆ",
    "ನಿಮ್ಮ ಸಂದೇಶದ ಗೆ",
];

const ATTACHMENT_SUFFIX: &str = " sent an attachment.";

fn normalized(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Whether a message is a reaction notice rather than a real message.
#[must_use]
pub fn is_reaction(message: &Message) -> bool {
    let Some(content) = message.content.as_deref() else {
        return false;
    };
    let text = normalized(&decode_text(content));
    REACTION_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// "You sent an attachment." style placeholders that exports emit alongside
/// shares.
#[must_use]
pub fn is_attachment_placeholder(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    lower.len() > ATTACHMENT_SUFFIX.len() && lower.ends_with(ATTACHMENT_SUFFIX)
}

/// Case-insensitive substring match on decoded content. An empty query
/// matches everything.
#[must_use]
pub fn matches_query(message: &Message, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    message
        .content
        .as_deref()
        .is_some_and(|c| decode_text(c).to_lowercase().contains(&query.to_lowercase()))
}

/// Ordered source handed to the window controller: reactions stripped and
/// the search applied.
#[must_use]
pub fn build_source(conversation: &Conversation, query: &str) -> Arc<[Message]> {
    conversation
        .messages
        .iter()
        .filter(|m| !is_reaction(m) && matches_query(m, query))
        .cloned()
        .collect()
}

/// Most recent message that is not a reaction notice.
#[must_use]
pub fn last_visible_message(conversation: &Conversation) -> Option<&Message> {
    conversation.messages.iter().rev().find(|m| !is_reaction(m))
}

/// Conversations whose decoded title contains `query`, case-insensitively.
/// Yields indices into `conversations`.
pub fn filter_titles<'a>(
    conversations: &'a [Conversation],
    query: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    let query = query.trim().to_lowercase();
    conversations
        .iter()
        .enumerate()
        .filter(move |(_, c)| query.is_empty() || c.display_title().to_lowercase().contains(&query))
        .map(|(i, _)| i)
}
