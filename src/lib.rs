//! springdex - The Simpsons character browser (TUI)
//!
//! Fetches the full paginated character list from The Simpsons API and
//! presents it as localized (pt-BR) cards with an enlarged-portrait modal.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
