pub mod app;
pub mod events;
pub mod layout;
pub mod portraits;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
