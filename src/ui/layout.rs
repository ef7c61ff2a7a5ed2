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

use crate::app::Focus;
use ratatui::layout::{Constraint, Layout, Rect};

pub const SIDEBAR_WIDTH: u16 = 32;
/// Below this width only the focused pane is shown.
pub const SPLIT_MIN_WIDTH: u16 = 72;

pub struct AppLayout {
    pub sidebar: Rect,
    /// One-column vertical rule between the sidebar and the chat side.
    pub sidebar_sep: Rect,
    pub header: Rect,
    pub header_sep: Rect,
    pub body: Rect,
    pub footer_sep: Rect,
    pub footer: Option<Rect>,
}

pub fn compute(area: Rect, focus: Focus) -> AppLayout {
    let zero = Rect::new(area.x, area.y, 0, 0);

    let (sidebar, sidebar_sep, main) = if area.width >= SPLIT_MIN_WIDTH {
        let [sidebar, sep, main] = Layout::horizontal([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(area);
        (sidebar, sep, main)
    } else if focus == Focus::Conversations {
        (area, zero, Rect::new(area.right(), area.y, 0, area.height))
    } else {
        (zero, zero, area)
    };

    if area.height < 6 {
        // Compact: body only, no header or footer
        return AppLayout {
            sidebar,
            sidebar_sep,
            header: Rect { height: 0, ..main },
            header_sep: Rect { height: 0, ..main },
            body: main,
            footer_sep: Rect { y: main.bottom(), height: 0, ..main },
            footer: None,
        };
    }

    let [header, header_sep, body, footer_sep, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(main);

    AppLayout { sidebar, sidebar_sep, header, header_sep, body, footer_sep, footer: Some(footer) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn area(w: u16, h: u16) -> Rect {
        Rect::new(0, 0, w, h)
    }

    fn total_main_height(layout: &AppLayout) -> u16 {
        layout.header.height
            + layout.header_sep.height
            + layout.body.height
            + layout.footer_sep.height
            + layout.footer.map_or(0, |f| f.height)
    }

    #[test]
    fn wide_terminal_splits_sidebar_and_chat() {
        let layout = compute(area(120, 40), Focus::Messages);
        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.sidebar_sep.width, 1);
        assert_eq!(layout.body.x, SIDEBAR_WIDTH + 1);
        assert_eq!(layout.body.width, 120 - SIDEBAR_WIDTH - 1);
        assert_eq!(total_main_height(&layout), 40);
        assert_eq!(layout.body.height, 36);
    }

    #[test]
    fn narrow_terminal_shows_focused_pane_only() {
        let list = compute(area(50, 20), Focus::Conversations);
        assert_eq!(list.sidebar.width, 50);
        assert_eq!(list.body.width, 0);

        let chat = compute(area(50, 20), Focus::Messages);
        assert_eq!(chat.sidebar.width, 0);
        assert_eq!(chat.body.width, 50);
    }

    #[test]
    fn short_terminal_drops_header_and_footer() {
        let layout = compute(area(100, 5), Focus::Messages);
        assert!(layout.footer.is_none());
        assert_eq!(layout.header.height, 0);
        assert_eq!(layout.body.height, 5);
    }

    #[test]
    fn areas_do_not_overlap() {
        let layout = compute(area(100, 30), Focus::Messages);
        let rows = [layout.header, layout.header_sep, layout.body, layout.footer_sep];
        for pair in rows.windows(2) {
            assert!(pair[0].bottom() <= pair[1].y, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }
}
