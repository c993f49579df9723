//! # AmountInput Component
//!
//! Single-line text field for the amount. Any character is accepted; the
//! reducer decides validity when it parses the buffer, so this component
//! never rejects input.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state, seeded from the application
//! state once at startup. The `focused` and `invalid` flags are props set
//! by the event loop each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the AmountInput
#[derive(Debug, Clone, PartialEq)]
pub enum AmountEvent {
    /// The buffer changed; carries the full new text.
    Changed(String),
}

/// Amount text field.
///
/// # Props
///
/// - `focused`: whether keyboard focus is on this field
/// - `invalid`: whether the current buffer failed to parse
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: byte offset of the cursor within `buffer`
pub struct AmountInput {
    pub buffer: String,
    pub focused: bool,
    pub invalid: bool,
    cursor: usize,
}

impl AmountInput {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            focused: false,
            invalid: false,
            cursor: initial.len(),
        }
    }

    fn prev_char_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl Component for AmountInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.invalid {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let input = Paragraph::new(self.buffer.as_str()).block(
            Block::bordered()
                .title("Amount")
                .border_style(border_style),
        );
        frame.render_widget(input, area);

        if self.focused {
            let cursor_x = area.x + 1 + self.buffer[..self.cursor].width() as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
        }
    }
}

impl EventHandler for AmountInput {
    type Event = AmountEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(AmountEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(AmountEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(AmountEvent::Changed(self.buffer.clone()))
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_char_boundary();
                    self.buffer.drain(self.cursor..next);
                    Some(AmountEvent::Changed(self.buffer.clone()))
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary();
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary();
                }
                None
            }
            _ => None,
        }
    }
}
