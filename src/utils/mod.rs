pub mod data;
pub mod event_filter;
