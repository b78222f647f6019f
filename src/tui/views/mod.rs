pub mod cards;
pub mod image_modal;
