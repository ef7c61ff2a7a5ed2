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

use crate::source::decode::decode_text;
use crate::source::filter::is_attachment_placeholder;
use crate::source::{Media, Message};
use crate::ui::theme;
use chrono::{DateTime, TimeZone};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Messages from the same sender closer together than this share one sender
/// line.
const GROUP_GAP_MS: i64 = 5 * 60 * 1000;

const BODY_INDENT: &str = "  ";

/// Whether `current` continues a run started by `previous`.
pub fn is_consecutive(previous: Option<&Message>, current: &Message) -> bool {
    previous.is_some_and(|prev| {
        prev.sender_name == current.sender_name
            && current.timestamp_ms - prev.timestamp_ms <= GROUP_GAP_MS
    })
}

/// Short label for a shared link.
pub fn prettify_link(url: &str) -> String {
    if url.contains("/reel/") {
        return "Instagram Reel".to_owned();
    }
    if url.contains("/p/") {
        return "Instagram Post".to_owned();
    }
    if url.contains("/stories/") {
        return "Instagram Story".to_owned();
    }
    if url.contains("instagram.com") {
        return "Instagram Link".to_owned();
    }
    link_host(url).map_or_else(|| "Link".to_owned(), |host| host.trim_start_matches("www.").to_owned())
}

fn link_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host.split(':').next()?;
    (!host.is_empty()).then_some(host)
}

/// `HH:MM` in `tz`.
pub fn format_time<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Long date used by day separators, e.g. "Thursday, March 4, 2021".
pub fn format_day<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(tz).format("%A, %B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Render one message as pre-wrapped rows: every pushed `Line` occupies
/// exactly one terminal row at `width`.
pub fn render_message<Tz: TimeZone>(
    msg: &Message,
    consecutive: bool,
    tz: &Tz,
    width: usize,
    out: &mut Vec<Line<'static>>,
) where
    Tz::Offset: std::fmt::Display,
{
    if !consecutive {
        let sender = msg.sender();
        let time = format_time(msg.timestamp_ms, tz);
        out.push(Line::from(vec![
            Span::styled(
                truncate_to_width(&sender, width.saturating_sub(time.width() + 2)),
                Style::default().fg(theme::sender_color(&msg.sender_name)).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(time, Style::default().fg(theme::DIM)),
        ]));
    }

    let body_width = width.saturating_sub(BODY_INDENT.len()).max(1);
    let text = msg.text();
    let share_link = msg.share_link();

    if let Some(link) = share_link {
        let mut label = format!("{} {}", theme::ICON_LINK, prettify_link(link));
        if let Some(owner) = msg.share.as_ref().and_then(|s| s.original_content_owner.as_deref()) {
            label.push_str(&format!(" @{owner}"));
        }
        push_wrapped(&label, Style::default().fg(theme::LINK), body_width, out);
        if let Some(share_text) = msg.share.as_ref().and_then(|s| s.share_text.as_deref())
            && !share_text.is_empty()
        {
            let decoded = decode_text(share_text);
            push_wrapped(&decoded, Style::default().fg(theme::DIM), body_width, out);
        }
    }

    if !text.is_empty() && !(share_link.is_some() && is_attachment_placeholder(&text)) {
        push_wrapped(&text, Style::default(), body_width, out);
    }

    if text.is_empty() && share_link.is_none() && !msg.has_media() {
        let placeholder = format!("[{} message]", msg.kind.as_deref().unwrap_or("unsupported"));
        push_wrapped(
            &placeholder,
            Style::default().fg(theme::DIM).add_modifier(Modifier::ITALIC),
            body_width,
            out,
        );
    }

    push_media(&msg.photos, theme::ICON_PHOTO, body_width, out);
    push_media(&msg.videos, theme::ICON_VIDEO, body_width, out);
    push_media(&msg.audio_files, theme::ICON_AUDIO, body_width, out);
}

fn push_media(media: &[Media], icon: &str, width: usize, out: &mut Vec<Line<'static>>) {
    for item in media {
        let name = item.uri.rsplit('/').next().unwrap_or(&item.uri);
        push_wrapped(&format!("{icon} {name}"), Style::default().fg(theme::DIM), width, out);
    }
}

fn push_wrapped(text: &str, style: Style, width: usize, out: &mut Vec<Line<'static>>) {
    for row in wrap_text(text, width) {
        out.push(Line::from(vec![Span::raw(BODY_INDENT), Span::styled(row, style)]));
    }
}

/// Greedy word wrap by display width. Hard line breaks are kept and words
/// wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut row = String::new();
        let mut row_width = 0;
        for word in paragraph.split(' ') {
            let word_width = word.width();
            let sep = usize::from(!row.is_empty());
            if row_width + sep + word_width <= width {
                if sep == 1 {
                    row.push(' ');
                }
                row.push_str(word);
                row_width += sep + word_width;
                continue;
            }
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if row_width + w > width && !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(c);
                row_width += w;
            }
        }
        rows.push(row);
    }
    rows
}

/// Cut `text` to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}
