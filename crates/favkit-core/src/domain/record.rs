//! Hydrated remote records.

use serde::{Deserialize, Serialize};

/// The remote payload behind a favorite.
///
/// Covers both record shapes the favorites screens render: anime entries
/// (title, poster, score, authors, publication window, background) and store
/// products (title, image, rating, description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Display title. Always present.
    pub title: String,

    /// Poster or product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Score or rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Author names, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    /// Start of publication, as delivered by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_from: Option<String>,

    /// End of publication. `None` while still running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_to: Option<String>,

    /// Long-form background or description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
}

impl Record {
    /// Create a record with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_url: None,
            score: None,
            authors: Vec::new(),
            published_from: None,
            published_to: None,
            synopsis: None,
        }
    }

    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.authors.push(name.into());
        self
    }

    #[must_use]
    pub fn with_published(mut self, from: impl Into<String>, to: Option<String>) -> Self {
        self.published_from = Some(from.into());
        self.published_to = to;
        self
    }

    #[must_use]
    pub fn with_synopsis(mut self, text: impl Into<String>) -> Self {
        self.synopsis = Some(text.into());
        self
    }

    /// Case-insensitive substring match on the title.
    ///
    /// `needle_lowercase` must already be lowercased.
    #[must_use]
    pub fn title_contains(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_contains_is_case_insensitive() {
        let record = Record::new("Dragon Ball Z");
        assert!(record.title_contains("dragon"));
        assert!(record.title_contains("ball z"));
        assert!(!record.title_contains("piece"));
    }

    #[test]
    fn test_optional_fields_are_skipped_when_empty() {
        let json = serde_json::to_value(Record::new("Naruto")).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Naruto" }));
    }

    #[test]
    fn test_builder_fills_fields() {
        let record = Record::new("Berserk")
            .with_image_url("https://cdn.example/berserk.jpg")
            .with_score(9.47)
            .with_author("Miura, Kentarou")
            .with_published("1989-08-25T00:00:00+00:00", None)
            .with_synopsis("Guts.");

        assert_eq!(record.authors, vec!["Miura, Kentarou".to_string()]);
        assert_eq!(record.score, Some(9.47));
        assert!(record.published_to.is_none());
    }
}
