use std::sync::atomic::{AtomicU8, Ordering};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Paragraph, Widget},
};

use crate::ui::styles;

const FRAMES: [&str; 4] = ["◰", "◳", "◲", "◱"];

/// Spinner state; every drawn frame advances it
#[derive(Debug, Default)]
pub struct Loading {
    index: AtomicU8,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LoadingWidget {
    index: u8,
}

impl From<&Loading> for LoadingWidget {
    fn from(loading: &Loading) -> Self {
        Self {
            index: loading.index.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl LoadingWidget {
    pub fn text(self) -> String {
        let frame = FRAMES[usize::from(self.index / 4) % FRAMES.len()];
        let dots = ".".repeat(usize::from(self.index / 4) % 4);
        format!("{frame} {}{dots:<3}", t!("status.loading"))
    }
}

impl Widget for LoadingWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(self.text(), styles::info())).render(area, buf);
    }
}
