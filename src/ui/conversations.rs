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

use crate::app::{App, Focus};
use crate::source::filter::last_visible_message;
use crate::ui::message::truncate_to_width;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.rendered_list_area = area;
    if area.height == 0 || area.width == 0 {
        return;
    }

    let [title_area, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let focused = app.focus == Focus::Conversations;
    let title_style = if focused {
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::DIM)
    };
    let mut title = vec![Span::styled(" Conversations", title_style)];
    if !app.title_filter.is_empty() {
        title.push(Span::styled(format!("  /{}", app.title_filter), Style::default().fg(theme::NOTICE)));
    }
    frame.render_widget(Paragraph::new(Line::from(title)), title_area);

    if app.listed.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(" No matches", Style::default().fg(theme::DIM)))),
            list_area,
        );
        return;
    }

    let width = usize::from(list_area.width).saturating_sub(2);
    let items: Vec<ListItem<'static>> = app
        .listed
        .iter()
        .filter_map(|&index| app.conversations.get(index).map(|c| (index, c)))
        .map(|(index, conversation)| {
            let open = app.selected == Some(index);
            let name_style = if open {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let count = format!(" {}", conversation.messages.len());
            let name = truncate_to_width(
                &conversation.display_title(),
                width.saturating_sub(count.len()),
            );
            let preview = last_visible_message(conversation)
                .map(|m| {
                    let text = m.text();
                    if text.is_empty() { format!("{}: [media]", m.sender()) } else { format!("{}: {text}", m.sender()) }
                })
                .unwrap_or_default();
            let preview = truncate_to_width(&preview.replace('\n', " "), width);
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(name, name_style),
                    Span::styled(count, Style::default().fg(theme::DIM)),
                ]),
                Line::from(vec![Span::raw(" "), Span::styled(preview, Style::default().fg(theme::DIM))]),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(theme::SELECTED_BG)
    } else {
        Style::default()
    };
    let list = List::new(items).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(app.list_cursor));
    frame.render_stateful_widget(list, list_area, &mut state);
}
