//! Front-matter splitting and parsing.
//!
//! Two block styles are recognized at the very start of a document:
//!
//! ```text
//! ---            +++
//! title: Hello   title = "Hello"
//! ---            +++
//! ```
//!
//! YAML blocks are fenced by lines of three or more dashes, TOML blocks by
//! lines of three or more plus signs.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("Front matter opened with {0:?} is never closed")]
    Unterminated(&'static str),
}

/// Syntax of a front-matter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

impl FrontmatterFormat {
    fn fence(&self) -> &'static str {
        match self {
            FrontmatterFormat::Yaml => "---",
            FrontmatterFormat::Toml => "+++",
        }
    }
}

/// A front-matter block split from its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterBlock<'a> {
    pub format: FrontmatterFormat,
    pub raw: &'a str,
    pub body: &'a str,
}

static YAML_OPEN: OnceLock<Regex> = OnceLock::new();
static YAML_BLOCK: OnceLock<Regex> = OnceLock::new();
static TOML_OPEN: OnceLock<Regex> = OnceLock::new();
static TOML_BLOCK: OnceLock<Regex> = OnceLock::new();

fn yaml_open() -> &'static Regex {
    YAML_OPEN.get_or_init(|| Regex::new(r"\A-{3,}[ \t]*\r?\n").unwrap())
}

fn yaml_block() -> &'static Regex {
    YAML_BLOCK.get_or_init(|| {
        Regex::new(r"(?ms)\A-{3,}[ \t]*\r?\n(.*?)^-{3,}[ \t]*\r?$\n?(.*)\z").unwrap()
    })
}

fn toml_open() -> &'static Regex {
    TOML_OPEN.get_or_init(|| Regex::new(r"\A\+{3,}[ \t]*\r?\n").unwrap())
}

fn toml_block() -> &'static Regex {
    TOML_BLOCK.get_or_init(|| {
        Regex::new(r"(?ms)\A\+{3,}[ \t]*\r?\n(.*?)^\+{3,}[ \t]*\r?$\n?(.*)\z").unwrap()
    })
}

/// Split a leading front-matter block from the document body.
///
/// Returns `Ok(None)` when the document does not open with a fence.
pub fn split_frontmatter(content: &str) -> Result<Option<FrontmatterBlock<'_>>, FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (format, block) = if yaml_open().is_match(content) {
        (FrontmatterFormat::Yaml, yaml_block())
    } else if toml_open().is_match(content) {
        (FrontmatterFormat::Toml, toml_block())
    } else {
        return Ok(None);
    };

    let captures = block
        .captures(content)
        .ok_or(FrontmatterError::Unterminated(format.fence()))?;

    Ok(Some(FrontmatterBlock {
        format,
        raw: captures.get(1).map_or("", |m| m.as_str()),
        body: captures.get(2).map_or("", |m| m.as_str()),
    }))
}

/// Parse front matter into a key/value mapping plus the markdown body.
///
/// A document without front matter yields an empty mapping and the full
/// content as body.
///
/// # Example
///
/// ```
/// use panreader_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\n---\n# Hello World\n";
///
/// let (fields, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fields.get("title").and_then(|v| v.as_str()), Some("My Post"));
/// assert_eq!(body, "# Hello World\n");
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Mapping, String), FrontmatterError> {
    let Some(block) = split_frontmatter(content)? else {
        return Ok((Mapping::new(), content.to_string()));
    };

    let value = match block.format {
        FrontmatterFormat::Yaml => {
            if block.raw.trim().is_empty() {
                Value::Null
            } else {
                serde_yaml::from_str::<Value>(block.raw)?
            }
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table = block.raw.parse()?;
            toml_to_yaml(toml::Value::Table(table))
        }
    };

    let fields = match value {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        Value::Tagged(tagged) => match tagged.value {
            Value::Mapping(map) => map,
            other => return Err(FrontmatterError::NotAMapping(kind_of(&other))),
        },
        other => return Err(FrontmatterError::NotAMapping(kind_of(&other))),
    };

    Ok((fields, block.body.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}
