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

use super::state::{App, Focus, PromptKind};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

const MOUSE_SCROLL_LINES: usize = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if app.prompt.is_some() {
                handle_prompt_key(app, key);
            } else {
                handle_normal_key(app, key);
            }
        }
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Paste(text) => {
            if let Some(prompt) = app.prompt.as_mut() {
                prompt.input.insert_str(&text);
            }
        }
        // Resize is handled automatically by ratatui
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let over_list = contains(app.rendered_list_area, mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp if over_list => app.move_list_cursor(false),
        MouseEventKind::ScrollDown if over_list => app.move_list_cursor(true),
        MouseEventKind::ScrollUp => app.scroll_up(MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => app.scroll_down(MOUSE_SCROLL_LINES),
        _ => {}
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    app.notice = None;
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        // Ctrl+L: force full terminal redraw
        (KeyCode::Char('l'), m) if m.contains(KeyModifiers::CONTROL) => app.force_redraw = true,
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Tab | KeyCode::BackTab, _) => {
            app.focus = match app.focus {
                Focus::Conversations if app.selected.is_some() => Focus::Messages,
                _ => Focus::Conversations,
            };
        }
        _ => match app.focus {
            Focus::Conversations => handle_list_key(app, key),
            Focus::Messages => handle_message_key(app, key),
        },
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_list_cursor(false),
        KeyCode::Down | KeyCode::Char('j') => app.move_list_cursor(true),
        KeyCode::Home | KeyCode::Char('g') => app.list_cursor = 0,
        KeyCode::End | KeyCode::Char('G') => {
            app.list_cursor = app.listed.len().saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.open_highlighted(),
        KeyCode::Char('/') => app.open_prompt(PromptKind::FilterConversations),
        KeyCode::Esc if !app.title_filter.is_empty() => app.set_title_filter(""),
        _ => {}
    }
}

fn handle_message_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.reset_to_head(),
        KeyCode::End | KeyCode::Char('G') => app.reset_to_tail(),
        KeyCode::Char('/') => app.open_prompt(PromptKind::SearchMessages),
        KeyCode::Char('d') => app.open_prompt(PromptKind::JumpToDate),
        KeyCode::Char('[') => app.step_day(false),
        KeyCode::Char(']') => app.step_day(true),
        KeyCode::Esc => {
            if app.message_query.is_empty() {
                app.focus = Focus::Conversations;
            } else {
                app.clear_search();
            }
        }
        KeyCode::Left | KeyCode::Char('h') => app.focus = Focus::Conversations,
        _ => {}
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    match key.code {
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Esc => app.prompt = None,
        _ => {
            let Some(prompt) = app.prompt.as_mut() else {
                return;
            };
            let input = &mut prompt.input;
            match key.code {
                KeyCode::Backspace => input.delete_char_before(),
                KeyCode::Delete => input.delete_char_after(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_home(),
                KeyCode::End => input.move_end(),
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
                KeyCode::Char(c) => input.insert_char(c),
                _ => {}
            }
            // The title filter narrows the list as the user types.
            if prompt.kind == PromptKind::FilterConversations {
                let text = prompt.input.text().to_owned();
                app.set_title_filter(&text);
            }
        }
    }
}
