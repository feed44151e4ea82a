use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::Text,
    widgets::{Paragraph, Widget, Wrap},
};

/// Heading plus body, centred vertically in the area
#[derive(Clone, Debug, Default)]
pub struct Content<'a> {
    heading: Text<'a>,
    content: Text<'a>,
}

impl<'a> Content<'a> {
    pub fn new(heading: impl Into<Text<'a>>, content: impl Into<Text<'a>>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }
}

impl Widget for Content<'_> {
    fn render(self, rect: Rect, buf: &mut Buffer) {
        let heading_len = u16::try_from(self.heading.lines.len()).unwrap_or(5);
        let content_len = u16::try_from(self.content.lines.len()).unwrap_or(10);
        let rect = rect
            .height
            .checked_sub(heading_len + content_len + 1)
            .map_or(rect, |h| {
                rect.inner(&Margin {
                    vertical: h / 2,
                    horizontal: 0,
                })
            });

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(heading_len),
                Constraint::Length(1),
                Constraint::Min(content_len),
            ])
            .split(rect);

        Paragraph::new(self.heading)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);
        Paragraph::new(self.content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_row as row;

    #[test]
    fn centres_heading_and_body() {
        let area = Rect::new(0, 0, 12, 7);
        let mut buf = Buffer::empty(area);
        Content::new("Oops", "try again").render(area, &mut buf);

        assert_eq!(row(&buf, 2), "    Oops    ");
        assert_eq!(row(&buf, 4).trim(), "try again");
    }
}
