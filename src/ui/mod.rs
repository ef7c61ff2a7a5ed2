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

mod chat;
mod conversations;
mod header;
mod layout;
mod message;
pub mod theme;

pub use chat::{ChatLayout, build_layout};
pub use message::{prettify_link, wrap_text};

use crate::app::{App, Focus};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const FOOTER_PAD: u16 = 1;

pub fn render(frame: &mut Frame, app: &mut App) {
    let areas = layout::compute(frame.area(), app.focus);

    if areas.sidebar.width > 0 {
        conversations::render(frame, areas.sidebar, app);
    } else {
        app.rendered_list_area = areas.sidebar;
    }
    render_vertical_separator(frame, areas.sidebar_sep);

    if areas.body.width == 0 {
        app.rendered_chat_area = areas.body;
        if let Some(footer) = areas.footer {
            render_footer(frame, footer, app);
        }
        return;
    }

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    // Measures the window, completes any pending load cycle, then draws.
    chat::render(frame, areas.body, app);

    render_separator(frame, areas.footer_sep);
    if let Some(footer) = areas.footer {
        render_footer(frame, footer, app);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };

    if let Some(prompt) = &app.prompt {
        let label = format!("{} {}", theme::PROMPT_CHAR, prompt.kind.label());
        let before_cursor: String = prompt.input.text().chars().take(prompt.input.cursor()).collect();
        let cursor_x = padded.x.saturating_add(
            u16::try_from(label.width() + before_cursor.width()).unwrap_or(u16::MAX),
        );
        let line = Line::from(vec![
            Span::styled(label, Style::default().fg(theme::ACCENT)),
            Span::raw(prompt.input.text().to_owned()),
        ]);
        frame.render_widget(Paragraph::new(line), padded);
        if cursor_x < padded.right() {
            frame.set_cursor_position(Position::new(cursor_x, padded.y));
        }
        return;
    }

    if let Some(notice) = &app.notice {
        let line = Line::from(Span::styled(notice.clone(), Style::default().fg(theme::NOTICE)));
        frame.render_widget(Paragraph::new(line), padded);
        return;
    }

    frame.render_widget(Paragraph::new(hint_line(app.focus)), padded);
}

fn hint_line(focus: Focus) -> Line<'static> {
    let hints: &[(&str, &str)] = match focus {
        Focus::Conversations => {
            &[("↑↓", "select"), ("Enter", "open"), ("/", "filter"), ("Tab", "messages"), ("q", "quit")]
        }
        Focus::Messages => &[
            ("↑↓ PgUp PgDn", "scroll"),
            ("g/G", "oldest/newest"),
            ("/", "search"),
            ("d", "date"),
            ("[ ]", "day"),
            ("Tab", "list"),
            ("q", "quit"),
        ],
    };
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(format!(" {action}"), Style::default().fg(theme::DIM)));
    }
    Line::from(spans)
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_vertical_separator(frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let lines: Vec<Line<'static>> = (0..area.height)
        .map(|_| Line::from(Span::styled("│", Style::default().fg(theme::DIM))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hints_follow_focus() {
        let list = hint_line(Focus::Conversations).to_string();
        assert!(list.starts_with("↑↓ select  Enter open"));
        let messages = hint_line(Focus::Messages).to_string();
        assert!(messages.contains("d date"));
        assert_eq!(messages.matches("  ").count(), 6);
    }
}
