//! # CurrencySelect Component
//!
//! One of the two currency selectors. The selection itself is core state
//! (`App::from` / `App::to`), so this is a transient render wrapper plus a
//! pure event-to-selection mapping; the component holds no state of its own.
//! The option set is the closed `SUPPORTED` list, so there is nothing to
//! validate.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::currency::Currency;
use crate::tui::event::TuiEvent;

/// Maps Up/Down onto the previous/next currency in the closed set.
/// Returns `None` for events that don't change the selection.
pub fn cycle_selection(selected: Currency, event: &TuiEvent) -> Option<Currency> {
    match event {
        TuiEvent::CursorUp => Some(selected.prev()),
        TuiEvent::CursorDown => Some(selected.next()),
        _ => None,
    }
}

/// Transient render wrapper for a currency selector.
pub struct CurrencySelect<'a> {
    label: &'a str,
    selected: Currency,
    focused: bool,
}

impl<'a> CurrencySelect<'a> {
    pub fn new(label: &'a str, selected: Currency, focused: bool) -> Self {
        Self {
            label,
            selected,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let code_style = if self.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let arrow_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let line = Line::from(vec![
            Span::styled("▴ ", arrow_style),
            Span::styled(self.selected.code(), code_style),
            Span::styled(" ▾", arrow_style),
        ]);

        let widget = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::bordered()
                .title(self.label)
                .border_style(border_style),
        );
        frame.render_widget(widget, area);
    }
}
