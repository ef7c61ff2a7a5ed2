use chrono::FixedOffset;
use msgview::app::App;
use msgview::source::{Conversation, Message, Participant};
use msgview::window::{Viewport, ViewportMetrics, Window, WindowConfig, WindowController};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// 2021-03-04T00:00:00Z
pub const MARCH_4: i64 = 1_614_816_000_000;
pub const DAY_MS: i64 = 86_400_000;

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("utc offset")
}

pub fn message(sender: &str, timestamp_ms: i64, content: &str) -> Message {
    Message {
        sender_name: sender.to_owned(),
        timestamp_ms,
        content: Some(content.to_owned()),
        ..Message::default()
    }
}

/// `count` messages alternating between two senders, `gap_ms` apart.
pub fn conversation(title: &str, count: usize, gap_ms: i64) -> Conversation {
    let messages = (0..count)
        .map(|i| {
            let sender = if i % 2 == 0 { "Ana" } else { "Bo" };
            let offset = i64::try_from(i).expect("small index") * gap_ms;
            message(sender, MARCH_4 + offset, &format!("message {i}"))
        })
        .collect();
    Conversation {
        title: title.to_owned(),
        participants: vec![
            Participant { name: "Ana".to_owned() },
            Participant { name: "Bo".to_owned() },
        ],
        messages,
        ..Conversation::default()
    }
}

/// Build an `App` in UTC. No terminal, just state.
pub fn test_app(conversations: Vec<Conversation>, config: WindowConfig) -> App {
    App::with_timezone(conversations, config, utc())
}

/// Rows of the message pane in a 100x30 frame: below the header and its
/// rule, above the footer rule.
pub const BODY_ROWS: std::ops::RangeInclusive<usize> = 2..=27;

/// Draw one frame into a `TestBackend` and return its rows as text.
pub fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal.draw(|f| msgview::ui::render(f, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect()
}

/// A pane where every record has its own height in rows.
pub struct Pane {
    heights: Vec<usize>,
    window: Window,
    record_rows: Vec<usize>,
    pub metrics: ViewportMetrics,
}

impl Pane {
    pub fn new(heights: Vec<usize>, client_height: usize) -> Self {
        Self {
            heights,
            window: Window::empty(),
            record_rows: Vec::new(),
            metrics: ViewportMetrics { client_height, ..ViewportMetrics::default() },
        }
    }

    /// Lay out the controller's current window.
    pub fn render<M>(&mut self, controller: &WindowController<M>) {
        self.window = controller.window();
        self.record_rows.clear();
        let mut row = 0;
        for index in self.window.range() {
            self.record_rows.push(row);
            row += self.heights[index];
        }
        self.metrics.scroll_height = row;
        self.metrics.scroll_top = self.metrics.scroll_top.min(self.metrics.max_scroll_top());
    }

    /// Record at the top of the pane and how many of its rows are scrolled
    /// past.
    pub fn top_position(&self) -> Option<(usize, usize)> {
        let top = self.metrics.scroll_top;
        let i = self.record_rows.partition_point(|&row| row <= top).checked_sub(1)?;
        Some((self.window.start() + i, top - self.record_rows[i]))
    }
}

impl Viewport for Pane {
    fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    fn locate_record(&self, index: usize) -> Option<usize> {
        self.window.contains(index).then(|| self.record_rows[index - self.window.start()])
    }

    fn top_record(&self) -> Option<usize> {
        self.top_position().map(|(index, _)| index)
    }

    fn scroll_to(&mut self, scroll_top: usize) {
        self.metrics.scroll_top = scroll_top.min(self.metrics.max_scroll_top());
    }
}

/// Record heights cycling through 1..=4 rows.
pub fn varied_heights(count: usize) -> Vec<usize> {
    (0..count).map(|i| 1 + (i * 7) % 4).collect()
}
