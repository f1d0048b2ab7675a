//! JSON parsing for record bodies.
//!
//! Sync functions that turn a raw response body into a [`Record`].

use crate::error::{HttpError, HttpResult};
use favkit_core::Record;
use serde_json::Value;

/// Parse a response body into a record.
///
/// Bodies wrapped in a `{ "data": { ... } }` envelope are unwrapped first.
/// `title` is required; every other field is best-effort.
pub fn parse_record(body: &Value) -> HttpResult<Record> {
    let body = body.get("data").filter(|d| d.is_object()).unwrap_or(body);

    let title = body
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HttpError::InvalidRecord {
            message: "missing title".to_string(),
        })?;

    let mut record = Record::new(title);

    if let Some(image) = parse_image(body) {
        record = record.with_image_url(image);
    }
    if let Some(score) = parse_score(body) {
        record = record.with_score(score);
    }
    for author in parse_authors(body) {
        record = record.with_author(author);
    }
    if let Some(from) = body
        .get("published")
        .and_then(|p| p.get("from"))
        .and_then(Value::as_str)
    {
        let to = body
            .get("published")
            .and_then(|p| p.get("to"))
            .and_then(Value::as_str)
            .map(ToString::to_string);
        record = record.with_published(from, to);
    }
    if let Some(text) = ["synopsis", "description", "background"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
    {
        record = record.with_synopsis(text);
    }

    Ok(record)
}

/// Cover image: `images.jpg.image_url`, then `image`, then `image_url`.
fn parse_image(body: &Value) -> Option<&str> {
    body.get("images")
        .and_then(|i| i.get("jpg"))
        .and_then(|j| j.get("image_url"))
        .and_then(Value::as_str)
        .or_else(|| body.get("image").and_then(Value::as_str))
        .or_else(|| body.get("image_url").and_then(Value::as_str))
}

/// Score: `score`, then `rating` as a number, then `rating.rate`.
fn parse_score(body: &Value) -> Option<f64> {
    body.get("score").and_then(Value::as_f64).or_else(|| {
        let rating = body.get("rating")?;
        rating
            .as_f64()
            .or_else(|| rating.get("rate").and_then(Value::as_f64))
    })
}

fn parse_authors(body: &Value) -> Vec<String> {
    body.get("authors")
        .and_then(Value::as_array)
        .map(|authors| {
            authors
                .iter()
                .filter_map(|a| a.get("name").and_then(Value::as_str))
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
