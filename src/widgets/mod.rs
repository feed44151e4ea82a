mod candlestick;
mod loading;
mod terminal;

pub use candlestick::Candlestick;
pub use loading::{Loading, LoadingWidget};
pub use terminal::Terminal;
