//! The Simpsons API character collection.

pub mod client;
pub mod error;
pub mod page;

pub use client::{CharacterClient, DEFAULT_ENDPOINT, DEFAULT_MAX_PAGES};
pub use error::{NetworkError, Result};
pub use page::Page;
