//! Cache Key Registry
//!
//! One fixed key per data category. Repositories address the shared cache
//! only through these keys so categories never collide.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const WEATHER: &str = "weather";
pub const CAMERAS: &str = "cameras";
pub const ALERTS: &str = "alerts";
pub const EVENTS: &str = "events";
pub const NEWS: &str = "news";
pub const POIS: &str = "pois";

// == Category ==
/// Data categories served through the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Weather,
    Cameras,
    Alerts,
    Events,
    News,
    Pois,
}

impl Category {
    /// Every category, in registry order.
    pub const ALL: [Category; 6] = [
        Category::Weather,
        Category::Cameras,
        Category::Alerts,
        Category::Events,
        Category::News,
        Category::Pois,
    ];

    /// The cache key this category is stored under.
    pub fn cache_key(self) -> &'static str {
        match self {
            Category::Weather => WEATHER,
            Category::Cameras => CAMERAS,
            Category::Alerts => ALERTS,
            Category::Events => EVENTS,
            Category::News => NEWS,
            Category::Pois => POIS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cache_key())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.cache_key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = Category::ALL.iter().map(|c| c.cache_key()).collect();
        assert_eq!(keys.len(), Category::ALL.len());
    }

    #[test]
    fn test_registry_strings() {
        assert_eq!(Category::Weather.cache_key(), "weather");
        assert_eq!(Category::Cameras.cache_key(), "cameras");
        assert_eq!(Category::Alerts.cache_key(), "alerts");
        assert_eq!(Category::Events.cache_key(), "events");
        assert_eq!(Category::News.cache_key(), "news");
        assert_eq!(Category::Pois.cache_key(), "pois");
    }

    #[test]
    fn test_parse_category() {
        for category in Category::ALL {
            assert_eq!(category.cache_key().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            "traffic".parse::<Category>(),
            Err(UnknownCategory("traffic".to_string()))
        );
    }

    #[test]
    fn test_serde_matches_cache_key() {
        let json = serde_json::to_string(&Category::Pois).unwrap();
        assert_eq!(json, "\"pois\"");
    }
}
