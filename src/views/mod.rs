use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    Frame,
};

use crate::app::{App, Page};
use crate::ui::{styles, Content};
use crate::widgets::LoadingWidget;

mod cards;
mod charts;
mod disclaimer;
mod footer;
mod header;
mod help;
mod page;
mod performance;
pub mod sidebar;

pub use disclaimer::lines as disclaimer_lines;

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar::WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    header::render(frame, rows[0], &app.controls);
    sidebar::render(frame, body[0], &app.sidebar, &app.controls);

    let main = body[1];
    match &app.page {
        Page::Loading => {
            let area = crate::ui::rect::centered(16, 1, main);
            frame.render_widget(LoadingWidget::from(&app.loading), area);
        }
        Page::Halted(halt) => {
            let (heading, style) = if halt.is_warning() {
                (t!("notice.warning"), styles::warning())
            } else {
                (t!("notice.error"), styles::error())
            };
            let content = Content::new(
                Line::from(Span::styled(heading, style)),
                Line::from(halt.message()),
            );
            frame.render_widget(content, main);
        }
        Page::Ready(dashboard) => page::render(frame, main, dashboard),
    }

    footer::render(frame, rows[2], app);

    if app.help {
        help::render(frame, frame.size());
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::catalog::Group;
    use crate::dashboard::{evaluate, Controls, Halt, Outcome};
    use crate::data::{ChartStyle, Period};
    use crate::helper::TEST_LOCALE_LOCK;
    use crate::provider::mock::MockProvider;
    use crate::ui::buffer_row;

    fn screen(app: &App, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend");
        terminal.draw(|frame| render(frame, app)).expect("draw");
        let buf = terminal.backend().buffer();
        (0..height).map(|y| buffer_row(buf, y)).collect()
    }

    fn controls(symbols: &[&str], chart: ChartStyle) -> Controls {
        let group = Group::TopMarketCap;
        Controls {
            group,
            selected: symbols.iter().filter_map(|s| group.find_symbol(s)).collect(),
            period: Period::OneYear,
            chart,
        }
    }

    async fn ready_app(provider: &MockProvider, controls: Controls) -> App {
        let mut app = App::new(controls.clone());
        let (generation, _) = app.begin();
        let outcome = evaluate(provider, &controls).await;
        assert!(matches!(outcome, Outcome::Ready(_)));
        app.finish(generation, outcome);
        app
    }

    #[test]
    fn halted_page_shows_warning() {
        let _guard = TEST_LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        rust_i18n::set_locale("en");

        let mut app = App::new(Controls::default());
        let (generation, _) = app.begin();
        app.finish(generation, Outcome::Halted(Halt::NoSelection));

        let text = screen(&app, 120, 40).join("\n");
        assert!(text.contains("Warning"));
        assert!(text.contains("Select at least one company"));
    }

    #[tokio::test]
    async fn ready_page_shows_every_section() {
        let provider = MockProvider::default()
            .with_series("AAPL", &[100.0, 105.0, 110.0])
            .failing("MSFT");
        let app = ready_app(&provider, controls(&["AAPL", "MSFT"], ChartStyle::Line)).await;

        let _guard = TEST_LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        rust_i18n::set_locale("en");
        let text = screen(&app, 140, 60).join("\n");

        assert!(text.contains("$110.00"));
        assert!(text.contains("Closing price"));
        assert!(text.contains("Performance"));
        assert!(text.contains("10.00%"));
        assert!(text.contains("Trading volume"));
        assert!(text.contains("Yahoo Finance"));
        assert!(text.contains("Could not load: Microsoft"));
    }

    #[tokio::test]
    async fn candlestick_page_names_the_single_company() {
        let provider = MockProvider::default()
            .with_series("AAPL", &[100.0, 90.0, 120.0])
            .with_series("GOOGL", &[50.0, 60.0]);
        let app = ready_app(
            &provider,
            controls(&["AAPL", "GOOGL"], ChartStyle::Candlestick),
        )
        .await;

        let _guard = TEST_LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        rust_i18n::set_locale("en");
        let text = screen(&app, 140, 60).join("\n");

        assert!(text.contains("Candlestick chart shows one company only: Apple"));
        assert!(text.contains("Apple candlestick"));
        assert!(text.contains("2024-01-01"));
        assert!(text.contains("2024-01-03"));
    }

    #[test]
    fn help_popup_is_drawn_on_top() {
        let _guard = TEST_LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        rust_i18n::set_locale("en");

        let mut app = App::new(Controls::default());
        app.help = true;
        let text = screen(&app, 120, 40).join("\n");
        assert!(text.contains("Help"));
        assert!(text.contains("Tab"));
    }
}
