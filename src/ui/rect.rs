use ratatui::layout::{Margin, Rect};

/// A `width` x `height` box in the middle of `r`, shrunk to fit
pub fn centered(width: u16, height: u16, r: Rect) -> Rect {
    let horizontal = if width == 0 {
        0
    } else {
        r.width.saturating_sub(width) / 2
    };
    let vertical = if height == 0 {
        0
    } else {
        r.height.saturating_sub(height) / 2
    };
    r.inner(&Margin {
        horizontal,
        vertical,
    })
}

/// Split `height` rows of `r` off the top
pub fn take_top(r: Rect, height: u16) -> (Rect, Rect) {
    let height = height.min(r.height);
    let top = Rect { height, ..r };
    let rest = Rect {
        y: r.y + height,
        height: r.height - height,
        ..r
    };
    (top, rest)
}
