use ratatui::{
    prelude::{Alignment, Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use time::macros::format_description;

use crate::app::{App, Page};
use crate::ui::styles;
use crate::widgets::LoadingWidget;

/// Loaded / selected counts of the page on screen
fn counts(page: &Page) -> Option<(usize, usize)> {
    match page {
        Page::Ready(dashboard) => Some((
            dashboard.loaded.len(),
            dashboard.controls.selected.len(),
        )),
        Page::Loading | Page::Halted(_) => None,
    }
}

pub fn render(frame: &mut Frame, rect: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rect);

    if app.is_loading() {
        frame.render_widget(LoadingWidget::from(&app.loading), chunks[0]);
    } else if let Some(updated_at) = app.updated_at {
        let time = updated_at
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default();
        let status = match counts(&app.page) {
            Some((loaded, selected)) => {
                t!("status.updated_counts", time = time, loaded = loaded, selected = selected)
            }
            None => t!("status.updated", time = time),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(status, styles::dark_gray())),
            chunks[0],
        );
    }

    let source = Span::styled(t!("status.source"), styles::dark_gray());
    frame.render_widget(Paragraph::new(source).alignment(Alignment::Right), chunks[1]);
}
