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

use crate::source::LoadError;
use crate::window::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Export not found")]
    ExportNotFound,
    #[error("Export could not be read")]
    ExportUnreadable,
    #[error("No conversations in export")]
    NoConversations,
    #[error("Invalid window configuration: {0}")]
    InvalidWindowConfig(ConfigError),
}

impl AppError {
    pub const EXPORT_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const EXPORT_UNREADABLE_EXIT_CODE: i32 = 21;
    pub const NO_CONVERSATIONS_EXIT_CODE: i32 = 22;
    pub const INVALID_WINDOW_CONFIG_EXIT_CODE: i32 = 23;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExportNotFound => Self::EXPORT_NOT_FOUND_EXIT_CODE,
            Self::ExportUnreadable => Self::EXPORT_UNREADABLE_EXIT_CODE,
            Self::NoConversations => Self::NO_CONVERSATIONS_EXIT_CODE,
            Self::InvalidWindowConfig(_) => Self::INVALID_WINDOW_CONFIG_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ExportNotFound => {
                "Export path not found. Pass the extracted export directory or a JSON file."
                    .to_owned()
            }
            Self::ExportUnreadable => {
                "The export could not be read. Check that the files are valid message JSON."
                    .to_owned()
            }
            Self::NoConversations => "The export does not contain any conversations.".to_owned(),
            Self::InvalidWindowConfig(err) => {
                format!("Invalid window settings: {err}. Adjust --max-window / --load-step.")
            }
        }
    }
}

impl From<&LoadError> for AppError {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::NotFound(_) => Self::ExportNotFound,
            LoadError::Empty(_) => Self::NoConversations,
            LoadError::Io { .. } | LoadError::Parse { .. } | LoadError::Walk(_) => {
                Self::ExportUnreadable
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidWindowConfig(err)
    }
}
