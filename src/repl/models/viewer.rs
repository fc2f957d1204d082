//! Read-only scrollable viewer for response body and response headers

use unicode_width::UnicodeWidthStr;

/// Content shown in the non-editable tabs, with vertical and horizontal scroll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    lines: Vec<String>,
    scroll: (usize, usize), // (vertical, horizontal)
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content and reset scrolling
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.lines().map(str::to_string).collect();
        self.scroll = (0, 0);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll_offset(&self) -> (usize, usize) {
        self.scroll
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll.0 = self.scroll.0.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll.0 = (self.scroll.0 + amount).min(max);
    }

    pub fn scroll_left(&mut self, amount: usize) {
        self.scroll.1 = self.scroll.1.saturating_sub(amount);
    }

    pub fn scroll_right(&mut self, amount: usize) {
        let widest = self
            .lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0);
        self.scroll.1 = (self.scroll.1 + amount).min(widest.saturating_sub(1));
    }
}
