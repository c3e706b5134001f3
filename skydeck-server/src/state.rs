use skydeck_core::{
    Config, NewsProvider, WeatherProvider, news_provider_from_config, weather_provider_from_config,
};
use std::sync::Arc;
use tracing::warn;

/// Shared handler state: the two upstream providers, built once at startup
/// from immutable configuration.
///
/// A provider whose credential is missing stays `None`; requests for it get
/// a configuration error instead of the whole server refusing to boot.
pub struct AppState {
    pub weather: Option<Arc<dyn WeatherProvider>>,
    pub news: Option<Arc<dyn NewsProvider>>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let weather = match weather_provider_from_config(config) {
            Ok(provider) => Some(Arc::from(provider)),
            Err(err) => {
                warn!(%err, "weather lookups disabled");
                None
            }
        };

        let news = match news_provider_from_config(config) {
            Ok(provider) => Some(Arc::from(provider)),
            Err(err) => {
                warn!(%err, "news lookups disabled");
                None
            }
        };

        Self { weather, news }
    }
}
