pub mod series;
pub mod snapshot;
pub mod types;

pub use series::{Bar, Series};
pub use snapshot::Snapshot;
pub use types::*;
