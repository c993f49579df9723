//! # ResultPanel Component
//!
//! Read-only display of the conversion outcome. While a fetch is in flight
//! the previous value stays visible with a spinner in the title; it is only
//! replaced when the live request settles (stale completions never reach
//! the state).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::{Outcome, format_amount};

const SPINNER_FRAMES: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

/// Transient render wrapper for the result display.
pub struct ResultPanel<'a> {
    outcome: &'a Outcome,
    is_loading: bool,
    spinner_frame: usize,
}

impl<'a> ResultPanel<'a> {
    pub fn new(outcome: &'a Outcome, is_loading: bool, spinner_frame: usize) -> Self {
        Self {
            outcome,
            is_loading,
            spinner_frame,
        }
    }

    /// The text shown inside the panel.
    pub fn display_text(&self) -> String {
        match self.outcome {
            Outcome::Idle => String::from("—"),
            Outcome::Converted { value, to } => format!("{} {}", format_amount(*value), to),
            Outcome::InvalidAmount => String::from("enter a valid amount"),
            Outcome::Failed(message) => format!("error: {message}"),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.is_loading {
            format!(
                "Result {}",
                SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
            )
        } else {
            String::from("Result")
        };

        let style = match self.outcome {
            Outcome::Idle => Style::default().fg(Color::DarkGray),
            Outcome::Converted { .. } => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Outcome::InvalidAmount => Style::default().fg(Color::DarkGray),
            Outcome::Failed(_) => Style::default().fg(Color::Red),
        };

        let panel = Paragraph::new(self.display_text())
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title));
        frame.render_widget(panel, area);
    }
}
