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

use ratatui::style::Color;

// Accent
pub const ACCENT: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const PROMPT_CHAR: &str = "❯";
pub const SEPARATOR_CHAR: &str = "─";
pub const SELECTED_BG: Color = Color::Rgb(40, 44, 52);

// Message pane
pub const LINK: Color = Color::Cyan;
pub const NOTICE: Color = Color::Yellow;
pub const ICON_LINK: &str = "↗";
pub const ICON_PHOTO: &str = "▣";
pub const ICON_VIDEO: &str = "▶";
pub const ICON_AUDIO: &str = "♪";

/// Sender name colors, picked by [`sender_color`].
pub const SENDER_COLORS: [Color; 12] = [
    Color::Rgb(0xe0, 0x52, 0x52),
    Color::Rgb(0xd9, 0x77, 0x06),
    Color::Rgb(0x05, 0x96, 0x69),
    Color::Rgb(0x25, 0x63, 0xeb),
    Color::Rgb(0x7c, 0x3a, 0xed),
    Color::Rgb(0xdb, 0x27, 0x77),
    Color::Rgb(0x08, 0x91, 0xb2),
    Color::Rgb(0x65, 0xa3, 0x0d),
    Color::Rgb(0xea, 0x58, 0x0c),
    Color::Rgb(0x4f, 0x46, 0xe5),
    Color::Rgb(0x0d, 0x94, 0x88),
    Color::Rgb(0xc0, 0x26, 0xd3),
];

/// 31-multiplier rolling hash over UTF-16 code units, wrapping at 32 bits.
/// Stable across runs, so a sender keeps their color.
fn name_hash(name: &str) -> u32 {
    let hash = name
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit)));
    hash.unsigned_abs()
}

pub fn sender_color(name: &str) -> Color {
    let slot = name_hash(name) as usize % SENDER_COLORS.len();
    SENDER_COLORS[slot]
}
