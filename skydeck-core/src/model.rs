use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Request body for the weather handler.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: String,
}

/// Request body for the news handler. The tag is optional; absent or
/// unrecognized tags fall back to [`Category::General`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Current conditions plus a short daily forecast for one city.
///
/// `city` is the upstream-resolved spelling, not necessarily the input
/// string. Temperatures are rounded to whole Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: i32,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub icon_code: String,
    pub forecast: Vec<ForecastDay>,
}

/// One calendar day's representative forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_c: i32,
    pub description: String,
    pub icon_code: String,
}

/// One normalized news item.
///
/// `category` is the tag the caller requested, not whatever upstream
/// reports for the article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub category: Category,
}

/// Caller-facing news category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Weather,
    Science,
    Technology,
    Environment,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Weather => "weather",
            Category::Science => "science",
            Category::Technology => "technology",
            Category::Environment => "environment",
        }
    }

    pub const fn all() -> &'static [Category] {
        &[
            Category::General,
            Category::Weather,
            Category::Science,
            Category::Technology,
            Category::Environment,
        ]
    }

    /// Parse a caller-supplied tag. Absent or unrecognized tags fall back
    /// to `General`; this mapping never fails.
    pub fn from_tag(tag: Option<&str>) -> Category {
        let Some(tag) = tag else {
            return Category::General;
        };

        match tag.to_lowercase().as_str() {
            "weather" => Category::Weather,
            "science" => Category::Science,
            "technology" => Category::Technology,
            "environment" => Category::Environment,
            // "all" is a legacy alias the dashboard used to send.
            _ => Category::General,
        }
    }

    /// Upstream search term for this category.
    pub fn query(&self) -> &'static str {
        match self {
            Category::General => "weather OR climate OR environment OR technology",
            Category::Weather => "weather OR climate OR meteorology",
            Category::Science => "climate science OR environmental science",
            Category::Technology => "weather technology OR climate tech",
            Category::Environment => "environment OR sustainability OR climate change",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
