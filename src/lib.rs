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

pub mod app;
pub mod calendar;
pub mod error;
pub mod source;
pub mod ui;
pub mod window;

use clap::Parser;
use window::{ConfigError, WindowConfig, config};

#[derive(Parser, Debug)]
#[command(name = "msgview", about = "Terminal viewer for large chat-message exports")]
pub struct Cli {
    /// Extracted export directory, a conversation JSON file, or a bundle file
    pub export: std::path::PathBuf,

    /// Open the first conversation whose title contains this text
    #[arg(long, short)]
    pub conversation: Option<String>,

    /// Maximum number of messages kept in the message pane
    #[arg(long, default_value_t = config::DEFAULT_MAX_WINDOW)]
    pub max_window: usize,

    /// Messages loaded per scroll extension (must be below --max-window)
    #[arg(long, default_value_t = config::DEFAULT_LOAD_STEP)]
    pub load_step: usize,

    /// Rows from either edge at which more messages are loaded
    #[arg(long, default_value_t = config::DEFAULT_PROXIMITY_MARGIN_ROWS)]
    pub proximity_margin: usize,

    /// Write tracing diagnostics to this file (disabled when omitted)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (e.g. `info`, `msgview::window=trace`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}

impl Cli {
    pub fn window_config(&self) -> Result<WindowConfig, ConfigError> {
        WindowConfig::new(self.max_window, self.load_step, self.proximity_margin)
    }
}
