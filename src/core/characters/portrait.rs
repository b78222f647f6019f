//! Portrait URL construction for the character CDN.

/// Default CDN base serving character portraits.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.thesimpsonsapi.com";

/// Path used when a character has no portrait.
pub const PLACEHOLDER_PATH: &str = "/character/placeholder.webp";

/// Portrait width used on cards.
pub const CARD_PORTRAIT_SIZE: u32 = 500;
/// Portrait width used in the enlarged modal.
pub const MODAL_PORTRAIT_SIZE: u32 = 1280;

/// Builds sized portrait URLs against a CDN base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitUrls {
    cdn_base: String,
}

impl PortraitUrls {
    pub fn new(cdn_base: &str) -> Self {
        Self {
            cdn_base: cdn_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn cdn_base(&self) -> &str {
        &self.cdn_base
    }

    /// `<cdn>/<size>/<path>` for a non-blank path, else the placeholder.
    ///
    /// A missing leading slash is inserted; the path is otherwise used as-is.
    pub fn build(&self, portrait_path: Option<&str>, size: u32) -> String {
        match portrait_path {
            Some(path) if !path.trim().is_empty() => {
                if path.starts_with('/') {
                    format!("{}/{size}{path}", self.cdn_base)
                } else {
                    format!("{}/{size}/{path}", self.cdn_base)
                }
            }
            _ => format!("{}/{size}{PLACEHOLDER_PATH}", self.cdn_base),
        }
    }
}

impl Default for PortraitUrls {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE)
    }
}
