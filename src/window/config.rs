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

pub const DEFAULT_MAX_WINDOW: usize = 400;
pub const DEFAULT_LOAD_STEP: usize = 150;
pub const DEFAULT_PROXIMITY_MARGIN_ROWS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max window must hold at least one record")]
    ZeroMaxWindow,
    #[error("load step must add at least one record")]
    ZeroLoadStep,
    #[error("load step ({load_step}) must be smaller than max window ({max_window})")]
    LoadStepTooLarge { load_step: usize, max_window: usize },
}

/// Sizing of the materialized message window.
///
/// `load_step < max_window` always holds for a constructed value, so a single
/// extension can never both fill the window and immediately re-trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    max_window: usize,
    load_step: usize,
    proximity_margin: usize,
}

impl WindowConfig {
    pub fn new(
        max_window: usize,
        load_step: usize,
        proximity_margin: usize,
    ) -> Result<Self, ConfigError> {
        if max_window == 0 {
            return Err(ConfigError::ZeroMaxWindow);
        }
        if load_step == 0 {
            return Err(ConfigError::ZeroLoadStep);
        }
        if load_step >= max_window {
            return Err(ConfigError::LoadStepTooLarge { load_step, max_window });
        }
        Ok(Self { max_window, load_step, proximity_margin })
    }

    /// Maximum number of records materialized at once.
    #[must_use]
    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// Records added (and possibly trimmed from the far edge) per extension.
    #[must_use]
    pub fn load_step(&self) -> usize {
        self.load_step
    }

    /// Distance in rows from either edge of the rendered content that fires
    /// an extension.
    #[must_use]
    pub fn proximity_margin(&self) -> usize {
        self.proximity_margin
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        *default_window_config()
    }
}

#[must_use]
pub fn default_window_config() -> &'static WindowConfig {
    static CONFIG: WindowConfig = WindowConfig {
        max_window: DEFAULT_MAX_WINDOW,
        load_step: DEFAULT_LOAD_STEP,
        proximity_margin: DEFAULT_PROXIMITY_MARGIN_ROWS,
    };
    &CONFIG
}
