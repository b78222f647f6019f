//! Character records and their formatted card projection.

pub mod format;
pub mod portrait;
pub mod record;
pub mod view;

pub use format::{FormattedStatus, StatusCategory};
pub use portrait::{PortraitUrls, CARD_PORTRAIT_SIZE, MODAL_PORTRAIT_SIZE};
pub use record::{CharacterRecord, Phrases};
pub use view::{CharacterView, DetailRow};
