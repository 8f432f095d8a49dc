//! Front matter extraction.
//!
//! Front matter is a YAML block at the very top of an article:
//!
//! ```markdown
//! ---
//! title: My Article
//! date: 2024-03-15
//! tags: [rust, blogging]
//! ---
//! # Content starts here
//! ```

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

const OPENING: &str = "---\n";
const CLOSING: &str = "\n---\n";

/// Front matter metadata parsed from an article.
///
/// Every field is optional; defaults are applied when the article is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub category: Option<String>,
    /// Any other keys, passed through to templates as `extra`
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Result of splitting front matter from markdown content.
#[derive(Debug)]
pub struct ParsedContent<'a> {
    /// The parsed front matter (empty if none found)
    pub front_matter: FrontMatter,
    /// The markdown body after the closing delimiter, or the whole input
    pub content: &'a str,
}

impl<'a> ParsedContent<'a> {
    fn unchanged(content: &'a str) -> Self {
        Self {
            front_matter: FrontMatter::default(),
            content,
        }
    }
}

/// Split an article into front matter and body.
///
/// The input must start with a `---` line and the block ends at the next
/// `---` line. A missing delimiter, invalid YAML, or a block that is not a
/// mapping all yield empty front matter and the input unchanged.
pub fn parse_front_matter(content: &str) -> ParsedContent<'_> {
    if !content.starts_with(OPENING) {
        return ParsedContent::unchanged(content);
    }

    // The search starts after the opening newline, so "---\n---\n" has no block.
    let Some(closing) = content[OPENING.len()..]
        .find(CLOSING)
        .map(|pos| pos + OPENING.len())
    else {
        return ParsedContent::unchanged(content);
    };

    let yaml = &content[OPENING.len()..closing];
    let body = &content[closing + CLOSING.len()..];

    match parse_block(yaml) {
        Ok(front_matter) => ParsedContent {
            front_matter,
            content: body,
        },
        Err(e) => {
            log::warn!("failed to parse front matter: {}", e);
            ParsedContent::unchanged(content)
        }
    }
}

fn parse_block(yaml: &str) -> Result<FrontMatter, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(yaml)?;
    if !value.is_mapping() {
        return Err(serde_yaml::Error::custom(format!(
            "front matter must be a mapping, found {}",
            kind(&value)
        )));
    }
    serde_yaml::from_value(value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn scalar_to_string(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s)),
        other => Err(format!("expected a scalar, found {}", kind(&other))),
    }
}

/// Accept any YAML scalar (`date: 2024-01-01`, `title: 1984`) as a string.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => scalar_to_string(value).map_err(D::Error::custom),
    }
}

/// Accept either a single tag or a list of tags.
fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Sequence(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                if let Some(tag) = scalar_to_string(item).map_err(D::Error::custom)? {
                    tags.push(tag);
                }
            }
            Ok(Some(tags))
        }
        Some(value) => Ok(scalar_to_string(value)
            .map_err(D::Error::custom)?
            .map(|tag| vec![tag])),
    }
}
