//! Application services: the post store, the listing pipeline and its session.

pub mod error;
pub mod listing;
pub mod reducer;
pub mod store;
