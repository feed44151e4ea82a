mod content;
pub mod rect;
pub mod styles;
pub mod text;

pub use content::Content;

#[cfg(test)]
pub(crate) fn buffer_row(buf: &ratatui::buffer::Buffer, y: u16) -> String {
    (buf.area.x..buf.area.right())
        .map(|x| buf.get(x, y).symbol.as_str())
        .collect()
}
