//! # View Layer
//!
//! Draws a full frame from the view model into a [`RenderStream`]. The
//! layout, top to bottom:
//!
//! ```text
//! row 0      URL slot, spinner or latency
//! row 1      Method slot, status block
//! row 2      error or message line
//! row 3      tab bar
//! row 4      separator
//! rows 5..   active tab: editor lines or the viewer
//! last row   key help
//! ```

use crate::repl::commands::{KeyAction, KeyMap};
use crate::repl::io::RenderStream;
use crate::repl::models::{TextInput, Viewer};
use crate::repl::view_models::{ActiveBuffer, ViewModel};
use crate::repl::views::styles;
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{ContentStyle, Print, PrintStyledContent, ResetColor},
    terminal::{Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

const PROMPT: &str = "> ";
const HEADER_ROWS: u16 = 5;
const FOOTER_ROWS: u16 = 1;

/// Actions listed in the help line, in display order
const HELP_ACTIONS: [KeyAction; 8] = [
    KeyAction::NextView,
    KeyAction::PrevView,
    KeyAction::NextTab,
    KeyAction::PrevTab,
    KeyAction::Run,
    KeyAction::AddToCollection,
    KeyAction::ExtractFromCollection,
    KeyAction::Quit,
];

/// Trait for rendering views
pub trait ViewRenderer {
    /// Initialize the terminal for rendering
    fn initialize(&mut self) -> Result<()>;

    /// Render the full application state
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Cleanup terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Crossterm renderer over an injected render stream
pub struct TerminalRenderer<RS: RenderStream> {
    stream: RS,
    terminal_size: (u16, u16),
    help_line: String,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(stream: RS) -> Result<Self> {
        let terminal_size = stream.get_size()?;
        Ok(Self {
            stream,
            terminal_size,
            help_line: help_line(&KeyMap::default()),
        })
    }

    /// Describe the bindings actually in use on the help line
    pub fn set_keymap(&mut self, keymap: &KeyMap) {
        self.help_line = help_line(keymap);
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn stream(&self) -> &RS {
        &self.stream
    }

    fn width(&self) -> usize {
        self.terminal_size.0 as usize
    }

    fn content_height(&self) -> usize {
        self.terminal_size
            .1
            .saturating_sub(HEADER_ROWS + FOOTER_ROWS) as usize
    }

    /// Print at the start of `row` and clear the rest of the line
    fn line(&mut self, row: u16, style: ContentStyle, text: &str) -> Result<()> {
        queue_term!(
            self.stream,
            MoveTo(0, row),
            PrintStyledContent(style.apply(text.to_string())),
            Clear(ClearType::UntilNewLine)
        )
    }

    fn render_slot(&mut self, row: u16, input: &TextInput) -> Result<usize> {
        let style = styles::slot_style(input.is_focused());
        let room = self.width().saturating_sub(PROMPT.len() + 1);
        let skip = slot_scroll(input, room);
        let visible = clip(input.value(), skip, room);

        queue_term!(
            self.stream,
            MoveTo(0, row),
            PrintStyledContent(style.apply(PROMPT)),
            PrintStyledContent(style.apply(visible.as_str()))
        )?;
        Ok(PROMPT.len() + visible.width())
    }

    fn render_inputs(&mut self, view_model: &ViewModel) -> Result<()> {
        let inputs = view_model.inputs();

        let used = self.render_slot(0, &inputs[0])?;
        if view_model.is_busy() {
            queue_term!(
                self.stream,
                PrintStyledContent(styles::spinner_style().apply(format!("    {}", view_model.spinner())))
            )?;
        } else if let Some(latency) = view_model.response().latency_ms() {
            if used + 12 < self.width() {
                queue_term!(self.stream, Print(format!("     {latency} ms")))?;
            }
        }
        queue_term!(self.stream, Clear(ClearType::UntilNewLine))?;

        let used = self.render_slot(1, &inputs[1])?;
        queue_term!(self.stream, Clear(ClearType::UntilNewLine))?;
        let response = view_model.response();
        if let (Some(band), false) = (response.band(), view_model.is_busy()) {
            let block = format!(" {} ", response.status_text());
            let column = self.width().saturating_sub(block.width()).max(used + 1);
            if column + block.width() <= self.width() {
                queue_term!(
                    self.stream,
                    MoveTo(column as u16, 1),
                    PrintStyledContent(styles::status_style(band).apply(block))
                )?;
            }
        }
        Ok(())
    }

    fn render_message(&mut self, view_model: &ViewModel) -> Result<()> {
        let width = self.width();
        if let Some(error) = view_model.response().error() {
            let text = clip(&format!("Error: {error}"), 0, width);
            self.line(2, styles::error_style(), &text)
        } else if let Some(message) = view_model.status_message() {
            let text = clip(message, 0, width);
            self.line(2, styles::message_style(), &text)
        } else {
            self.line(2, ContentStyle::new(), "")
        }
    }

    fn render_tab_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let focus = view_model.focus();
        let border = styles::border_style(focus);
        queue_term!(self.stream, MoveTo(0, 3))?;

        let mut used = 0;
        for (index, tab) in view_model.tabs().iter().enumerate() {
            let label = format!(" {} ", tab.title());
            if used + label.width() + 1 > self.width() {
                break;
            }
            let active = index == view_model.active_tab_index();
            queue_term!(
                self.stream,
                PrintStyledContent(border.apply("│")),
                PrintStyledContent(styles::tab_style(active, focus).apply(label.clone()))
            )?;
            used += label.width() + 1;
        }
        if used < self.width() {
            queue_term!(self.stream, PrintStyledContent(border.apply("│")))?;
        }
        queue_term!(self.stream, Clear(ClearType::UntilNewLine))?;

        let separator = "─".repeat(self.width());
        self.line(4, border, &separator)
    }

    fn render_content(&mut self, view_model: &ViewModel) -> Result<()> {
        let height = self.content_height();
        let width = self.width();

        let rows: Vec<String> = match view_model.editor(view_model.active_tab()) {
            Some(editor) => {
                let top = editor_scroll(editor.cursor().line, height);
                editor
                    .lines()
                    .iter()
                    .skip(top)
                    .take(height)
                    .map(|line| clip(line, 0, width))
                    .collect()
            }
            None => viewer_rows(view_model.viewer(), height, width),
        };

        for offset in 0..height {
            let row = HEADER_ROWS + offset as u16;
            let text = rows.get(offset).map(String::as_str).unwrap_or("");
            self.line(row, ContentStyle::new(), text)?;
        }
        Ok(())
    }

    fn render_help(&mut self) -> Result<()> {
        let row = self.terminal_size.1.saturating_sub(1);
        let text = clip(&self.help_line, 0, self.width());
        self.line(row, styles::help_style(), &text)
    }

    /// Place the terminal cursor on the active buffer's cursor
    fn render_cursor(&mut self, view_model: &ViewModel) -> Result<()> {
        match view_model.active_buffer() {
            ActiveBuffer::Input(index) => {
                let input = &view_model.inputs()[index];
                let room = self.width().saturating_sub(PROMPT.len() + 1);
                let skip = slot_scroll(input, room);
                let before: String = input.value().chars().take(input.cursor()).collect();
                let column = PROMPT.len() + before.width().saturating_sub(skip);
                queue_term!(self.stream, MoveTo(column as u16, index as u16))?;
                self.stream.show_cursor()
            }
            ActiveBuffer::Editor(tab) => {
                let Some(editor) = view_model.editor(tab) else {
                    return self.stream.hide_cursor();
                };
                let cursor = editor.cursor();
                let top = editor_scroll(cursor.line, self.content_height());
                let before: String = editor.current_line().chars().take(cursor.column).collect();
                let row = HEADER_ROWS as usize + cursor.line - top;
                let column = before.width().min(self.width().saturating_sub(1));
                queue_term!(self.stream, MoveTo(column as u16, row as u16))?;
                self.stream.show_cursor()
            }
            ActiveBuffer::Viewer => self.stream.hide_cursor(),
        }
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.stream.enable_raw_mode()?;
        self.stream.enter_alternate_screen()?;
        self.stream.clear_screen()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        // Hide cursor before drawing to avoid flicker
        self.stream.hide_cursor()?;

        self.render_inputs(view_model)?;
        self.render_message(view_model)?;
        self.render_tab_bar(view_model)?;
        self.render_content(view_model)?;
        self.render_help()?;
        queue_term!(self.stream, ResetColor)?;
        self.render_cursor(view_model)?;

        self.stream.flush().map_err(anyhow::Error::from)
    }

    fn cleanup(&mut self) -> Result<()> {
        self.stream.show_cursor()?;
        self.stream.leave_alternate_screen()?;
        self.stream.disable_raw_mode()?;
        Ok(())
    }
}

/// `key description • key description ...`
pub fn help_line(keymap: &KeyMap) -> String {
    HELP_ACTIONS
        .iter()
        .filter_map(|action| {
            keymap
                .binding_for(*action)
                .map(|binding| format!("{} {}", binding, action.help()))
        })
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Columns to skip so a slot's cursor stays within `room`
fn slot_scroll(input: &TextInput, room: usize) -> usize {
    let before: String = input.value().chars().take(input.cursor()).collect();
    before.width().saturating_sub(room)
}

/// First visible editor line so the cursor line stays on screen
fn editor_scroll(cursor_line: usize, height: usize) -> usize {
    if height == 0 {
        return cursor_line;
    }
    cursor_line.saturating_sub(height - 1)
}

fn viewer_rows(viewer: &Viewer, height: usize, width: usize) -> Vec<String> {
    let (top, left) = viewer.scroll_offset();
    viewer
        .lines()
        .iter()
        .skip(top)
        .take(height)
        .map(|line| clip(line, left, width))
        .collect()
}

/// Cut `text` to the display columns `[skip, skip + max)`; wide characters
/// straddling either edge are dropped
pub fn clip(text: &str, skip: usize, max: usize) -> String {
    let mut column = 0;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if column < skip {
            column += width;
            continue;
        }
        if used + width > max {
            break;
        }
        out.push(ch);
        used += width;
        column += width;
    }
    out
}
