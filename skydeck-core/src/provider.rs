use crate::{
    Config, Error, Result,
    model::{Category, NewsArticle, WeatherSnapshot},
    provider::{newsapi::NewsApiClient, openweather::OpenWeatherClient},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod newsapi;
pub mod openweather;

/// A weather upstream: resolves a city name to current conditions plus a
/// daily forecast, or fails. Never returns a partial snapshot.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn lookup(&self, city: &str) -> Result<WeatherSnapshot>;
}

/// A news upstream: lists normalized articles for a category tag. Fewer
/// articles than requested, including none, is success.
#[async_trait]
pub trait NewsProvider: Send + Sync + Debug {
    async fn lookup(&self, category: Category) -> Result<Vec<NewsArticle>>;
}

/// Construct the weather provider, failing fast when its key is missing.
pub fn weather_provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    let api_key = config
        .openweather_api_key
        .as_deref()
        .ok_or(Error::Configuration("Weather"))?;

    Ok(Box::new(OpenWeatherClient::new(api_key.to_owned())))
}

/// Construct the news provider, failing fast when its key is missing.
pub fn news_provider_from_config(config: &Config) -> Result<Box<dyn NewsProvider>> {
    let api_key = config
        .news_api_key
        .as_deref()
        .ok_or(Error::Configuration("News"))?;

    Ok(Box::new(NewsApiClient::new(api_key.to_owned())))
}
