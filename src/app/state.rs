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

use chrono::{FixedOffset, NaiveDate};
use ratatui::layout::Rect;

use super::input::PromptInput;
use super::viewport::ChatViewport;
use crate::calendar::{self, DayIndex};
use crate::source::filter;
use crate::source::{Conversation, Message};
use crate::window::{
    Completion, Continuation, LoadIntent, ScrollAction, Viewport, WindowConfig, WindowController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Conversations,
    Messages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SearchMessages,
    JumpToDate,
    FilterConversations,
}

impl PromptKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SearchMessages => "Search messages: ",
            Self::JumpToDate => "Jump to date (YYYY-MM-DD): ",
            Self::FilterConversations => "Filter conversations: ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: PromptInput,
}

pub struct App {
    pub conversations: Vec<Conversation>,
    /// Indices into `conversations` that match `title_filter`, in list order.
    pub listed: Vec<usize>,
    pub title_filter: String,
    /// Highlighted row in `listed`.
    pub list_cursor: usize,
    /// Index into `conversations` of the open conversation.
    pub selected: Option<usize>,
    pub message_query: String,
    pub focus: Focus,
    pub prompt: Option<Prompt>,
    pub controller: WindowController<Message>,
    pub viewport: ChatViewport,
    /// Post-render step of the current load cycle, completed by the chat
    /// renderer once the new window has been laid out.
    pub pending: Option<Continuation>,
    /// Day buckets of the controller's current source.
    pub days: DayIndex,
    pub tz: FixedOffset,
    /// One-shot message shown in the footer.
    pub notice: Option<String>,
    pub should_quit: bool,
    pub force_redraw: bool,
    /// Areas from the last frame, used for mouse hit-testing.
    pub rendered_list_area: Rect,
    pub rendered_chat_area: Rect,
}

impl App {
    /// Build the app in the local time zone.
    pub fn new(conversations: Vec<Conversation>, config: WindowConfig) -> Self {
        Self::with_timezone(conversations, config, *chrono::Local::now().offset())
    }

    pub fn with_timezone(
        conversations: Vec<Conversation>,
        config: WindowConfig,
        tz: FixedOffset,
    ) -> Self {
        let listed = (0..conversations.len()).collect();
        Self {
            conversations,
            listed,
            title_filter: String::new(),
            list_cursor: 0,
            selected: None,
            message_query: String::new(),
            focus: Focus::Conversations,
            prompt: None,
            controller: WindowController::new(config),
            viewport: ChatViewport::default(),
            pending: None,
            days: DayIndex::default(),
            tz,
            notice: None,
            should_quit: false,
            force_redraw: false,
            rendered_list_area: Rect::default(),
            rendered_chat_area: Rect::default(),
        }
    }

    #[must_use]
    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.selected.and_then(|i| self.conversations.get(i))
    }

    // --- conversation list ---

    pub fn set_title_filter(&mut self, filter_text: &str) {
        filter_text.clone_into(&mut self.title_filter);
        self.listed = filter::filter_titles(&self.conversations, &self.title_filter).collect();
        self.list_cursor = self.list_cursor.min(self.listed.len().saturating_sub(1));
    }

    pub fn move_list_cursor(&mut self, down: bool) {
        if self.listed.is_empty() {
            return;
        }
        self.list_cursor = if down {
            (self.list_cursor + 1).min(self.listed.len() - 1)
        } else {
            self.list_cursor.saturating_sub(1)
        };
    }

    pub fn open_highlighted(&mut self) {
        if let Some(&index) = self.listed.get(self.list_cursor) {
            self.open_conversation(index);
        }
    }

    /// Open the first conversation whose title contains `query`.
    pub fn open_matching(&mut self, query: &str) {
        let found = filter::filter_titles(&self.conversations, query).next();
        match found {
            Some(index) => {
                if let Some(pos) = self.listed.iter().position(|&i| i == index) {
                    self.list_cursor = pos;
                }
                self.open_conversation(index);
            }
            None => self.notice = Some(format!("No conversation matching \"{query}\"")),
        }
    }

    pub fn open_conversation(&mut self, index: usize) {
        if index >= self.conversations.len() {
            return;
        }
        tracing::info!(index, "opening conversation");
        self.selected = Some(index);
        self.message_query.clear();
        self.prompt = None;
        self.focus = Focus::Messages;
        self.reload_source();
    }

    // --- message source ---

    pub fn apply_search(&mut self, query: &str) {
        if self.selected.is_none() {
            return;
        }
        query.trim().clone_into(&mut self.message_query);
        self.reload_source();
        if !self.message_query.is_empty() {
            let matches = self.controller.source().len();
            self.notice = Some(format!("{matches} matches for \"{}\"", self.message_query));
        }
    }

    pub fn clear_search(&mut self) {
        if !self.message_query.is_empty() {
            self.apply_search("");
        }
    }

    /// Rebuild the ordered source from the open conversation and the search,
    /// and reset the window to its tail.
    fn reload_source(&mut self) {
        let Some(conversation) = self.selected_conversation() else {
            return;
        };
        let source = filter::build_source(conversation, &self.message_query);
        self.days = DayIndex::build(&source, &self.tz);
        self.viewport.release();
        self.pending = Some(self.controller.replace_source(source));
    }

    // --- navigation ---

    pub fn reset_to_head(&mut self) {
        self.navigate(|controller, viewport| controller.request(LoadIntent::ResetToHead, viewport));
    }

    pub fn reset_to_tail(&mut self) {
        self.navigate(|controller, viewport| controller.request(LoadIntent::ResetToTail, viewport));
    }

    pub fn jump_to_date(&mut self, day: NaiveDate) {
        match self.days.first_index_on(day) {
            Some(index) => {
                self.navigate(|controller, viewport| controller.jump_to_index(index, viewport));
            }
            None => self.notice = Some(format!("No messages on {day}")),
        }
    }

    /// Jump to the first message on the local day of `timestamp_ms`.
    pub fn jump_to_timestamp(&mut self, timestamp_ms: i64) {
        let found =
            calendar::first_index_on_day_of(self.controller.source(), timestamp_ms, &self.tz);
        match found {
            Some(index) => {
                self.navigate(|controller, viewport| controller.jump_to_index(index, viewport));
            }
            None => self.notice = Some("No messages on that day".to_owned()),
        }
    }

    pub fn jump_to_date_text(&mut self, text: &str) {
        match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
            Ok(day) => self.jump_to_date(day),
            Err(_) => self.notice = Some(format!("Not a date: \"{}\" (use YYYY-MM-DD)", text.trim())),
        }
    }

    /// Jump to the previous or next day that has messages, relative to the
    /// message at the top of the pane.
    pub fn step_day(&mut self, forward: bool) {
        let Some(current) = self.top_day() else {
            return;
        };
        let target =
            if forward { self.days.next_day(current) } else { self.days.previous_day(current) };
        match target {
            Some(day) => self.jump_to_date(day),
            None => {
                self.notice =
                    Some(if forward { "Already at the last day" } else { "Already at the first day" }.to_owned());
            }
        }
    }

    fn top_day(&self) -> Option<NaiveDate> {
        let index = self.viewport.top_record()?;
        let message = self.controller.source().get(index)?;
        calendar::day_of(message.timestamp_ms, &self.tz)
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.viewport.scroll_up(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.viewport.scroll_down(rows);
    }

    pub fn page_up(&mut self) {
        let rows = self.viewport.client_height().saturating_sub(1).max(1);
        self.viewport.scroll_up(rows);
    }

    pub fn page_down(&mut self) {
        let rows = self.viewport.client_height().saturating_sub(1).max(1);
        self.viewport.scroll_down(rows);
    }

    // --- load cycle plumbing ---

    /// Run an explicit navigation. It takes over from a cycle still waiting
    /// for its render.
    fn navigate(
        &mut self,
        run: impl FnOnce(&mut WindowController<Message>, &ChatViewport) -> Option<Continuation>,
    ) {
        if self.controller.in_flight() {
            let phase = self.controller.phase();
            tracing::debug!(?phase, "navigation supersedes pending cycle");
            self.controller.cancel();
            self.pending = None;
            self.viewport.release();
        }
        let next = run(&mut self.controller, &self.viewport);
        self.start_cycle(next);
    }

    fn start_cycle(&mut self, next: Option<Continuation>) {
        let Some(next) = next else {
            return;
        };
        if matches!(next.action(), ScrollAction::Compensate(_)) {
            self.viewport.hold();
        }
        self.pending = Some(next);
    }

    /// Finish the pending load cycle. Called after the message pane has been
    /// measured for the current window.
    pub fn complete_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match self.controller.complete(pending, &mut self.viewport) {
            Completion::Applied | Completion::Stale => {}
            Completion::Reverted(next) => {
                self.notice = Some("Jump target could not be shown".to_owned());
                self.pending = Some(next);
            }
        }
        // Scrolling done while the extension was pending lands on top of the
        // compensated offset.
        self.viewport.release();
    }

    /// Extend the window when the pane nears an edge. No-op while a cycle is
    /// waiting for its render.
    pub fn check_proximity(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let next = self.controller.on_proximity(&self.viewport);
        self.start_cycle(next);
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        let input = match kind {
            PromptKind::SearchMessages => PromptInput::with_text(&self.message_query),
            PromptKind::FilterConversations => PromptInput::with_text(&self.title_filter),
            PromptKind::JumpToDate => PromptInput::new(),
        };
        self.prompt = Some(Prompt { kind, input });
    }

    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let text = prompt.input.text().to_owned();
        match prompt.kind {
            PromptKind::SearchMessages => self.apply_search(&text),
            PromptKind::JumpToDate => self.jump_to_date_text(&text),
            PromptKind::FilterConversations => self.set_title_filter(&text),
        }
    }
}
