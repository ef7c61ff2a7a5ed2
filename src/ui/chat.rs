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

use crate::app::App;
use crate::calendar::day_of;
use crate::source::Message;
use crate::ui::message;
use crate::ui::theme;
use chrono::FixedOffset;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const CHAT_PAD: u16 = 1;

/// A reverted jump changes the window once more; lay out again for it
/// before drawing.
const MAX_LAYOUT_PASSES: usize = 3;

/// Pre-wrapped rows of the materialized window.
pub struct ChatLayout {
    pub lines: Vec<Line<'static>>,
    /// Row at which each visible record starts, in window order.
    pub record_rows: Vec<usize>,
    pub window_start: usize,
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let area = Rect {
        x: area.x + CHAT_PAD,
        y: area.y,
        width: area.width.saturating_sub(CHAT_PAD * 2),
        height: area.height,
    };
    app.rendered_chat_area = area;

    if app.selected.is_none() {
        render_hint(frame, area, "Select a conversation");
        return;
    }

    let width = usize::from(area.width);
    let height = usize::from(area.height);
    let mut layout = build_layout(app, width);
    for _ in 0..MAX_LAYOUT_PASSES {
        let window = app.controller.window();
        let rows = layout.lines.len();
        app.viewport.measure(layout.window_start, std::mem::take(&mut layout.record_rows), rows, height);
        app.complete_pending();
        if app.controller.window() == window {
            break;
        }
        layout = build_layout(app, width);
    }

    if app.controller.source().is_empty() {
        let hint =
            if app.message_query.is_empty() { "No messages to display" } else { "No matching messages" };
        render_hint(frame, area, hint);
        return;
    }

    let content_height = layout.lines.len();
    let paragraph = Paragraph::new(layout.lines);
    if content_height < height {
        // Short content sits at the bottom of the pane.
        let offset = u16::try_from(height - content_height).unwrap_or(0);
        let render_area = Rect {
            y: area.y + offset,
            height: area.height.saturating_sub(offset),
            ..area
        };
        frame.render_widget(paragraph, render_area);
    } else {
        let scroll = u16::try_from(app.viewport.scroll_top()).unwrap_or(u16::MAX);
        frame.render_widget(paragraph.scroll((scroll, 0)), area);
    }
}

fn render_hint(frame: &mut Frame, area: Rect, text: &'static str) {
    let y = area.y + area.height / 2;
    let row = Rect { y, height: area.height.min(1), ..area };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(theme::DIM))).centered()),
        row,
    );
}

/// Lay out the controller's current window at `width` columns.
pub fn build_layout(app: &App, width: usize) -> ChatLayout {
    let view = app.controller.snapshot();
    let mut lines = Vec::new();
    let mut record_rows = Vec::with_capacity(view.visible.len());

    if view.has_older {
        lines.push(indicator(format!("{} older messages above", view.older_count())));
    }

    let mut previous: Option<&Message> = None;
    for msg in view.visible {
        record_rows.push(lines.len());
        let new_day = previous.is_none_or(|prev| !same_day(prev, msg, &app.tz));
        if new_day {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(day_separator(msg.timestamp_ms, &app.tz, width));
        }
        let consecutive = !new_day && message::is_consecutive(previous, msg);
        if !consecutive && !new_day {
            lines.push(Line::default());
        }
        message::render_message(msg, consecutive, &app.tz, width, &mut lines);
        previous = Some(msg);
    }

    if view.has_newer {
        lines.push(Line::default());
        lines.push(indicator(format!("{} newer messages below", view.newer_count())));
    }

    ChatLayout { lines, record_rows, window_start: view.window_start }
}

fn same_day(a: &Message, b: &Message, tz: &FixedOffset) -> bool {
    day_of(a.timestamp_ms, tz) == day_of(b.timestamp_ms, tz)
}

fn indicator(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(theme::DIM).add_modifier(Modifier::ITALIC)))
        .centered()
}

fn day_separator(timestamp_ms: i64, tz: &FixedOffset, width: usize) -> Line<'static> {
    let label = format!(" {} ", message::format_day(timestamp_ms, tz));
    let label = message::truncate_to_width(&label, width);
    let side = width.saturating_sub(unicode_width::UnicodeWidthStr::width(label.as_str())) / 2;
    let rule = theme::SEPARATOR_CHAR.repeat(side.min(8));
    Line::from(vec![
        Span::styled(rule.clone(), Style::default().fg(theme::DIM)),
        Span::styled(label, Style::default().fg(theme::DIM).add_modifier(Modifier::BOLD)),
        Span::styled(rule, Style::default().fg(theme::DIM)),
    ])
    .centered()
}
