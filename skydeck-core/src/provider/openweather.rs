use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::{
    Error, Result,
    model::{ForecastDay, WeatherSnapshot},
};

use super::WeatherProvider;

const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Cap on distinct calendar days kept from the forecast series.
const MAX_FORECAST_DAYS: usize = 7;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<OwCurrentResponse> {
        let res = self
            .http
            .get(CURRENT_URL)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound("City not found".to_string()));
        }

        if !status.is_success() {
            return Err(Error::Upstream {
                status: Some(status.as_u16()),
                message: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Upstream {
            status: None,
            message: format!("Failed to parse OpenWeather current JSON: {e}"),
        })
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        coord: Option<&OwCoord>,
    ) -> Result<OwForecastResponse> {
        // Coordinates from the current-conditions call resolve ambiguous
        // city names; fall back to the name when upstream omitted them.
        let req = match coord {
            Some(c) => {
                debug!(lat = c.lat, lon = c.lon, "forecast query by coordinates");
                self.http
                    .get(FORECAST_URL)
                    .query(&[("lat", c.lat.to_string()), ("lon", c.lon.to_string())])
            }
            None => {
                debug!(city, "forecast query by city name");
                self.http.get(FORECAST_URL).query(&[("q", city)])
            }
        };

        let res = req
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: Some(status.as_u16()),
                message: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Upstream {
            status: None,
            message: format!("Failed to parse OpenWeather forecast JSON: {e}"),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn lookup(&self, city: &str) -> Result<WeatherSnapshot> {
        if city.trim().is_empty() {
            return Err(Error::InvalidRequest("City name is required".to_string()));
        }

        let current = self.fetch_current(city).await?;

        // The forecast is not optional: either a complete snapshot or a failure.
        let forecast = self.fetch_forecast(city, current.coord.as_ref()).await?;
        let days = fold_daily(&forecast.list);

        let (description, icon_code) = condition(&current.weather);

        info!(city = %current.name, days = days.len(), "weather lookup complete");

        Ok(WeatherSnapshot {
            city: current.name,
            temperature_c: current.main.temp.round() as i32,
            description,
            humidity_pct: current.main.humidity,
            wind_speed_kmh: mps_to_kmh(current.wind.speed),
            icon_code,
            forecast: days,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    coord: Option<OwCoord>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

/// Fold a sub-daily forecast series into one sample per UTC calendar day,
/// earliest first, capped at [`MAX_FORECAST_DAYS`].
///
/// The first sample seen for a date wins; later samples for that date are
/// dropped. Entries with unrepresentable timestamps are skipped.
fn fold_daily(entries: &[OwForecastEntry]) -> Vec<ForecastDay> {
    let mut days = Vec::with_capacity(MAX_FORECAST_DAYS);
    let mut seen: HashSet<NaiveDate> = HashSet::new();

    for entry in entries {
        let Some(date) = entry_date(entry.dt) else {
            continue;
        };

        if !seen.insert(date) {
            continue;
        }

        let (description, icon_code) = condition(&entry.weather);

        days.push(ForecastDay {
            date,
            temp_c: entry.main.temp.round() as i32,
            description,
            icon_code,
        });

        if days.len() == MAX_FORECAST_DAYS {
            break;
        }
    }

    days
}

fn entry_date(ts: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

fn condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let truncated: String = body.chars().take(MAX).collect();
        format!("{truncated}...")
    } else {
        body.to_string()
    }
}
