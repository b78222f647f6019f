use crate::config::AppConfig;
use crate::core::api::CharacterClient;
use crate::core::characters::PortraitUrls;

/// Centralized handle to the backends the TUI talks to.
///
/// Created once at startup, then passed by ref to views that need backend
/// access.
#[derive(Debug, Clone)]
pub struct Services {
    /// Character API client.
    pub client: CharacterClient,
    /// Portrait URL builder for the configured CDN.
    pub portrait_urls: PortraitUrls,
}

impl Services {
    /// Initialize all services from config.
    pub fn init(config: &AppConfig) -> Self {
        let client = CharacterClient::from_config(&config.api);
        log::info!(
            "Character API at {} (max pages: {})",
            client.endpoint(),
            config.api.max_pages
        );

        let portrait_urls = PortraitUrls::new(&config.api.cdn_base);
        log::info!("Portrait CDN at {}", portrait_urls.cdn_base());

        Self {
            client,
            portrait_urls,
        }
    }
}
