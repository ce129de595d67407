//! News View - a one-shot Hacker News listing
//!
//! This crate fetches the latest stories from the Algolia Hacker News search
//! API and holds them in observable state for display.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod view;
