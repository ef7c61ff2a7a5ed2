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

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::model::Conversation;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("export path {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to walk export directory: {0}")]
    Walk(#[from] ignore::Error),
    #[error("no conversations found under {}", .0.display())]
    Empty(PathBuf),
}

/// A single export file: either one conversation or a bundle of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExportDocument {
    Bundle { conversations: Vec<Conversation> },
    Single(Conversation),
}

/// Load every conversation under `path`.
///
/// `path` may be a conversation file, a `{"conversations": [...]}` bundle, or
/// a directory searched recursively for `message_*.json`. Parts of the same
/// thread are merged, messages are sorted oldest first and conversations
/// most recently active first.
pub fn load_export(path: &Path) -> Result<Vec<Conversation>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let files = if path.is_dir() { message_files(path)? } else { vec![path.to_path_buf()] };
    let mut parts = Vec::new();
    for file in &files {
        parts.extend(read_document(file)?);
    }
    tracing::info!(files = files.len(), parts = parts.len(), path = %path.display(), "export read");

    let conversations = merge_threads(parts);
    if conversations.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    Ok(conversations)
}

fn is_message_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
        name.strip_prefix("message_").and_then(|rest| rest.strip_suffix(".json")).is_some()
    })
}

fn message_files(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for entry in ignore::WalkBuilder::new(root).hidden(false).ignore(false).git_ignore(false).build()
    {
        let entry = entry?;
        if entry.file_type().is_some_and(|t| t.is_file()) && is_message_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn read_document(path: &Path) -> Result<Vec<Conversation>, LoadError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let doc: ExportDocument = serde_json::from_str(&raw)
        .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })?;
    Ok(match doc {
        ExportDocument::Bundle { conversations } => conversations,
        ExportDocument::Single(conversation) => vec![conversation],
    })
}

fn merge_threads(parts: Vec<Conversation>) -> Vec<Conversation> {
    let mut by_thread: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Conversation> = Vec::new();

    for part in parts {
        if part.messages.is_empty() && part.participants.is_empty() && part.title.is_empty() {
            tracing::warn!(thread = %part.thread_path, "skipping empty export document");
            continue;
        }
        let slot = if part.thread_path.is_empty() {
            None
        } else {
            by_thread.get(&part.thread_path).copied()
        };
        match slot.and_then(|i| merged.get_mut(i)) {
            Some(existing) => existing.messages.extend(part.messages),
            None => {
                if !part.thread_path.is_empty() {
                    by_thread.insert(part.thread_path.clone(), merged.len());
                }
                merged.push(part);
            }
        }
    }

    for conversation in &mut merged {
        conversation.messages.sort_by_key(|m| m.timestamp_ms);
    }
    merged.sort_by_key(|c| std::cmp::Reverse(c.latest_timestamp_ms()));
    merged
}
