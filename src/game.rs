use serde::{Deserialize, Serialize};
use std::fmt;

/// A single catalog entry as published in `games.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub slug: String,
    pub title: String,
    pub genre: String,
    pub publisher: String,
    /// `YYYY-MM-DD`, compared lexically.
    pub release_date: String,
    pub rating: f64,
    pub cover: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Qualitative bucket for a numeric rating, used as the badge CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingTier {
    Good,
    Ok,
    Bad,
}

impl RatingTier {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 8.5 {
            Self::Good
        } else if rating >= 7.0 {
            Self::Ok
        } else {
            Self::Bad
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Ok => "ok",
            Self::Bad => "bad",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "good" => Some(Self::Good),
            "ok" => Some(Self::Ok),
            "bad" => Some(Self::Bad),
            _ => None,
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Game {
    pub fn tier(&self) -> RatingTier {
        RatingTier::from_rating(self.rating)
    }

    /// Rating as shown on the badge: `9`, `8.5`, `7.25`.
    pub fn rating_label(&self) -> String {
        self.rating.to_string()
    }

    pub fn platform_list(&self) -> String {
        self.platforms.join(", ")
    }

    pub fn card_anchor(&self) -> String {
        format!("{}-card", self.slug)
    }

    /// Long-form description, falling back to the summary.
    pub fn description(&self) -> &str {
        self.details
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.summary.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(rating: f64) -> Game {
        Game {
            slug: "x".to_string(),
            title: "X".to_string(),
            genre: "RPG".to_string(),
            publisher: "P".to_string(),
            release_date: "2020-01-01".to_string(),
            rating,
            cover: "assets/x.jpg".to_string(),
            summary: None,
            details: None,
            platforms: vec![],
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RatingTier::from_rating(8.5), RatingTier::Good);
        assert_eq!(RatingTier::from_rating(8.4999), RatingTier::Ok);
        assert_eq!(RatingTier::from_rating(7.0), RatingTier::Ok);
        assert_eq!(RatingTier::from_rating(6.999), RatingTier::Bad);
        assert_eq!(RatingTier::from_rating(10.0), RatingTier::Good);
        assert_eq!(RatingTier::from_rating(f64::NAN), RatingTier::Bad);
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(game(9.0).rating_label(), "9");
        assert_eq!(game(8.5).rating_label(), "8.5");
    }

    #[test]
    fn test_description_prefers_details() {
        let mut g = game(8.0);
        assert_eq!(g.description(), "");
        g.summary = Some("short".to_string());
        assert_eq!(g.description(), "short");
        g.details = Some("long\ntext".to_string());
        assert_eq!(g.description(), "long\ntext");
    }

    #[test]
    fn test_deserialize_optional_fields() {
        let json = r#"{"slug":"a","title":"A","genre":"Sim","publisher":"P",
            "release_date":"2016-02-26","rating":9,"cover":"a.jpg"}"#;
        let g: Game = serde_json::from_str(json).unwrap();
        assert_eq!(g.rating, 9.0);
        assert!(g.platforms.is_empty());
        assert!(g.summary.is_none());
        assert_eq!(g.platform_list(), "");
    }
}
