//! Blog listing core: load a static post feed once, then filter, search, and sort
//! it in response to listing interactions.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
