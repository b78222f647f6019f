// Core modules
pub mod api;
pub mod characters;
pub mod logging;
