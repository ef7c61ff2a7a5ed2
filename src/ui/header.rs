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
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 1;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };
    frame.render_widget(Paragraph::new(header_line(app)), padded);
}

pub fn header_line(app: &App) -> Line<'static> {
    let Some(conversation) = app.selected_conversation() else {
        return Line::from(vec![
            Span::styled("msgview", Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  \u{2502}  {} conversations", app.conversations.len()),
                Style::default().fg(theme::DIM),
            ),
        ]);
    };

    let sep = || Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));
    let view = app.controller.snapshot();

    let mut spans = vec![
        Span::styled(
            conversation.display_title(),
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("{} participants", conversation.participants.len()),
            Style::default().fg(theme::DIM),
        ),
        sep(),
        Span::styled(
            format!("{} messages", conversation.messages.len()),
            Style::default().fg(theme::DIM),
        ),
    ];
    if !app.message_query.is_empty() {
        spans.push(sep());
        spans.push(Span::styled(
            format!("{} matches for \"{}\"", view.total_count, app.message_query),
            Style::default().fg(theme::NOTICE),
        ));
    }
    if view.is_partial() {
        spans.push(sep());
        spans.push(Span::styled(
            format!("{} of {} loaded", view.visible.len(), view.total_count),
            Style::default().fg(Color::White),
        ));
    }
    Line::from(spans)
}
