//! Rendering boundary: view models and HTML templates for the listing.

pub mod views;
