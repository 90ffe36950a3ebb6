//! Page metadata and the parsed page collection.
//!
//! # Data flow
//!
//! ```text
//! content/blog/post.md
//!     │
//!     ├── front matter (--- YAML --- or +++ TOML +++)
//!     │       └── decode_front_matter() ──► PageMeta
//!     │
//!     └── body ──► markdown::convert() ──► HTML
//!                                            │
//!                                            ▼
//!                     Page { path: "/blog/post", content, meta }
//!                                            │
//!                                            ▼
//!                            Pages { items: Vec<Page> }  (owned by the build)
//! ```

use crate::utils::date::{self, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Front matter syntax, chosen by its delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterKind {
    /// `---` delimited YAML
    Yaml,
    /// `+++` delimited TOML
    Toml,
}

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("invalid metadata")]
    Decode(#[from] serde_json::Error),
}

/// Metadata decoded from a page's front matter.
///
/// ```yaml
/// ---
/// title: Hello
/// description: First post
/// type: post
/// published: 2024-06-15
/// custom:
///   tags: [intro, meta]
/// ---
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Selects `types/<type>.html`
    #[serde(rename = "type")]
    pub page_type: String,
    #[serde(deserialize_with = "date::deserialize_opt")]
    pub published: Option<Timestamp>,
    /// Free-form user data, any nesting
    pub custom: Map<String, Value>,
}

/// One parsed content file.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Logical URL, e.g. `/blog/post`
    pub path: String,
    /// Source markdown file
    #[serde(skip)]
    pub source: PathBuf,
    /// Rendered HTML body (trusted)
    pub content: String,
    pub meta: PageMeta,
}

/// The complete page collection of one build, in discovery order.
#[derive(Debug, Default)]
pub struct Pages {
    pub items: Vec<Page>,
}

impl Pages {
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.items.iter().find(|page| page.path == url)
    }
}

/// Decode raw front matter text into [`PageMeta`].
///
/// Both syntaxes go through a JSON value first so YAML and TOML share one
/// set of field rules. An empty block yields default metadata.
pub fn decode_front_matter(kind: FrontMatterKind, raw: &str) -> Result<PageMeta, FrontMatterError> {
    if raw.trim().is_empty() {
        return Ok(PageMeta::default());
    }

    let value = match kind {
        FrontMatterKind::Yaml => serde_yaml::from_str::<Value>(raw)?,
        FrontMatterKind::Toml => toml_to_json(toml::Value::Table(toml::from_str(raw)?)),
    };

    let value = match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    Ok(serde_json::from_value(value)?)
}

/// TOML datetimes become their RFC 3339 text so they decode like YAML dates.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_decode_yaml() {
        let meta = decode_front_matter(
            FrontMatterKind::Yaml,
            "title: Hello\ndescription: First\ntype: post\npublished: 2024-06-15\n",
        )
        .unwrap();
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.description, "First");
        assert_eq!(meta.page_type, "post");
        assert_eq!(meta.published.unwrap().day(), 15);
        assert!(meta.custom.is_empty());
    }

    #[test]
    fn test_decode_yaml_nested_custom() {
        let meta = decode_front_matter(
            FrontMatterKind::Yaml,
            "type: post\ncustom:\n  tags: [a, b]\n  hero:\n    image: /img/x.png\n    width: 640\n",
        )
        .unwrap();
        assert_eq!(meta.custom["tags"], json!(["a", "b"]));
        assert_eq!(meta.custom["hero"]["width"], json!(640));
    }

    #[test]
    fn test_decode_toml() {
        let meta = decode_front_matter(
            FrontMatterKind::Toml,
            "title = \"Hello\"\ntype = \"post\"\npublished = 2024-06-15T10:00:00Z\n\n[custom]\ndraft = true\n",
        )
        .unwrap();
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.page_type, "post");
        assert_eq!(meta.published.unwrap().month(), 6);
        assert_eq!(meta.custom["draft"], json!(true));
    }

    #[test]
    fn test_decode_toml_local_date() {
        let meta =
            decode_front_matter(FrontMatterKind::Toml, "published = 2023-12-31\n").unwrap();
        assert_eq!(meta.published.unwrap().year(), 2023);
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let meta = decode_front_matter(FrontMatterKind::Yaml, "title: Only\n").unwrap();
        assert_eq!(meta.title, "Only");
        assert_eq!(meta.page_type, "");
        assert!(meta.published.is_none());
    }

    #[test]
    fn test_decode_empty_block() {
        assert_eq!(
            decode_front_matter(FrontMatterKind::Yaml, "  \n").unwrap(),
            PageMeta::default()
        );
    }

    #[test]
    fn test_decode_unknown_keys_ignored() {
        let meta = decode_front_matter(FrontMatterKind::Yaml, "type: page\nlayout: wide\n").unwrap();
        assert_eq!(meta.page_type, "page");
    }

    #[test]
    fn test_decode_malformed_yaml() {
        let err = decode_front_matter(FrontMatterKind::Yaml, "title: [unclosed\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_decode_malformed_toml() {
        let err = decode_front_matter(FrontMatterKind::Toml, "title = \n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Toml(_)));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let err = decode_front_matter(FrontMatterKind::Yaml, "just a sentence\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Decode(_)));

        let err = decode_front_matter(FrontMatterKind::Yaml, "published: someday\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Decode(_)));
    }

    #[test]
    fn test_page_serializes_for_templates() {
        let page = Page {
            path: "/blog/post".into(),
            source: PathBuf::from("content/blog/post.md"),
            content: "<p>hi</p>".into(),
            meta: decode_front_matter(FrontMatterKind::Yaml, "type: post\npublished: 2024-01-02\n")
                .unwrap(),
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["path"], json!("/blog/post"));
        assert_eq!(value["meta"]["type"], json!("post"));
        assert!(value.get("source").is_none());
        let published = value["meta"]["published"].as_str().unwrap();
        assert!(published.starts_with("2024-01-02T00:00:00"));
    }

    #[test]
    fn test_pages_lookup() {
        let pages = Pages {
            items: vec![Page {
                path: "/about".into(),
                source: PathBuf::from("content/about.md"),
                content: String::new(),
                meta: PageMeta::default(),
            }],
        };
        assert_eq!(pages.len(), 1);
        assert!(!pages.is_empty());
        assert!(pages.get("/about").is_some());
        assert!(pages.get("/missing").is_none());
    }
}
