//! Domain records, one per cached category.
//!
//! Each record decodes independently from its origin JSON, so a bad record
//! only drops itself from the batch.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cache::Category;

/// A domain record served through the cache under its category's key.
pub trait Record: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const CATEGORY: Category;
}

/// Current conditions for the city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub temperature: f64,
    pub condition: String,
    #[serde(default)]
    pub humidity: Option<u8>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Traffic or civil-protection alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
}

/// Traffic camera with a snapshot URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Record for Weather {
    const CATEGORY: Category = Category::Weather;
}

impl Record for Alert {
    const CATEGORY: Category = Category::Alerts;
}

impl Record for Camera {
    const CATEGORY: Category = Category::Cameras;
}

impl Record for Event {
    const CATEGORY: Category = Category::Events;
}

impl Record for News {
    const CATEGORY: Category = Category::News;
}

impl Record for Poi {
    const CATEGORY: Category = Category::Pois;
}
