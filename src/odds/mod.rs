pub mod cache;
pub mod repository;

pub use cache::SnapshotCache;
pub use repository::{distinct_sports, filter_by_sport, OddsRepository};
