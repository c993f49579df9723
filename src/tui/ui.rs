use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{CurrencySelect, ResultPanel};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Length(3), Min(0), Length(1)]);
    let [title_area, inputs_area, result_area, _filler, help_area] = layout.areas(frame.area());

    // Title bar
    let title_text = if app.status_message.is_empty() {
        format!("kurs ({})", app.provider.name())
    } else {
        format!("kurs ({}) | {}", app.provider.name(), app.status_message)
    };
    frame.render_widget(Span::raw(title_text), title_area);

    // Inputs row: amount, from, to
    let row = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
    ]);
    let [amount_area, from_area, to_area] = row.areas(inputs_area);

    tui.amount_input.render(frame, amount_area);
    CurrencySelect::new("From", app.from, tui.focus == Focus::From).render(frame, from_area);
    CurrencySelect::new("To", app.to, tui.focus == Focus::To).render(frame, to_area);

    // Result panel
    ResultPanel::new(&app.outcome, app.is_loading, spinner_frame).render(frame, result_area);

    // Help footer
    let help = Span::styled(
        " Tab focus  ↑/↓ currency  Ctrl+R refresh  Esc quit ",
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(help, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Currency;
    use crate::core::state::Outcome;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_defaults() {
        let app = test_app();
        let mut tui = TuiState::new(&app);

        let text = render_to_text(&app, &mut tui);

        assert!(text.contains("kurs"));
        assert!(text.contains("100"));
        assert!(text.contains("EUR"));
        assert!(text.contains("USD"));
        assert!(text.contains("Result"));
    }

    #[test]
    fn test_draw_ui_shows_settled_result() {
        let mut app = test_app();
        app.outcome = Outcome::Converted {
            value: 110.0,
            to: Currency::Usd,
        };
        let mut tui = TuiState::new(&app);

        let text = render_to_text(&app, &mut tui);

        assert!(text.contains("110 USD"));
    }

    #[test]
    fn test_draw_ui_shows_status_message() {
        let mut app = test_app();
        app.status_message = "rates as of 2024-01-12".to_string();
        let mut tui = TuiState::new(&app);

        let text = render_to_text(&app, &mut tui);

        assert!(text.contains("rates as of 2024-01-12"));
    }
}
