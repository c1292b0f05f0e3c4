//! Frontmatter splitting and per-collection schema validation.
//!
//! A file starts with a YAML block between two `---` lines. The block is
//! deserialized into the raw shape of its collection and then checked:
//! required fields present, date coercible, tags lowercase-hyphenated.

use std::io;
use std::io::ErrorKind;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::content::{BlogData, CollectionKind, EntryData, NoteData};
use crate::text_utils::parse_date_time;

pub const DEFAULT_TAG: &str = "others";

#[derive(Deserialize)]
struct RawBlog {
    title: String,
    description: String,
    date: serde_yaml::Value,
    tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawNote {
    title: String,
    date: serde_yaml::Value,
    tags: Option<Vec<String>>,
}

fn invalid(file_name: &Path, desc: impl AsRef<str>) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, format!("{} - file={}", desc.as_ref(), file_name.display()))
}

/// Splits `---\n<yaml>\n---\n<body>` into its two parts.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref FRONTMATTER_REGEX: Regex = Regex::new(r"(?s)\A\x{FEFF}?---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n(.*))?\z").unwrap();
    }

    let caps = FRONTMATTER_REGEX.captures(content)?;
    let yaml = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());
    Some((yaml, body))
}

fn coerce_date(file_name: &Path, value: &serde_yaml::Value) -> io::Result<chrono::NaiveDateTime> {
    let as_text = match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        _ => return Err(invalid(file_name, "Field `date` must be a date")),
    };
    parse_date_time(&as_text).map_err(|e| invalid(file_name, format!("Field `date`: {}", e)))
}

fn validate_tags(file_name: &Path, tags: Option<Vec<String>>) -> io::Result<Vec<String>> {
    lazy_static! {
        static ref TAG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    }

    let Some(tags) = tags else {
        return Ok(vec![DEFAULT_TAG.to_string()]);
    };

    if let Some(bad) = tags.iter().find(|t| !TAG_REGEX.is_match(t)) {
        return Err(invalid(file_name, format!("Invalid tag `{}`, expected lowercase words joined by hyphens", bad)));
    }
    Ok(tags)
}

/// Validates the frontmatter of a file against the schema of `kind`.
/// Returns the typed data and the body that follows the block.
pub fn parse_entry(kind: CollectionKind, file_name: &Path, content: &str) -> io::Result<(EntryData, String)> {
    let Some((yaml, body)) = split_frontmatter(content) else {
        return Err(invalid(file_name, "Missing frontmatter block"));
    };

    let data = match kind {
        CollectionKind::Blog => {
            let raw: RawBlog = serde_yaml::from_str(yaml)
                .map_err(|e| invalid(file_name, format!("Invalid blog frontmatter: {}", e)))?;
            EntryData::Blog(BlogData {
                title: raw.title,
                description: raw.description,
                date: coerce_date(file_name, &raw.date)?,
                tags: validate_tags(file_name, raw.tags)?,
            })
        }
        CollectionKind::Notes => {
            let raw: RawNote = serde_yaml::from_str(yaml)
                .map_err(|e| invalid(file_name, format!("Invalid notes frontmatter: {}", e)))?;
            EntryData::Notes(NoteData {
                title: raw.title,
                date: coerce_date(file_name, &raw.date)?,
                tags: validate_tags(file_name, raw.tags)?,
            })
        }
    };

    Ok((data, body.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const BLOG: &str = r#"---
title: Building a blog
description: Notes on the stack
date: 2024-06-01
tags: [rust, static-sites]
---
# Hello

Body text.
"#;

    #[test]
    fn test_split() {
        let (yaml, body) = split_frontmatter(BLOG).unwrap();
        assert!(yaml.starts_with("title: Building a blog"));
        assert!(body.starts_with("# Hello"));
        assert!(split_frontmatter("# No frontmatter").is_none());
    }

    #[test]
    fn test_split_without_body() {
        let (yaml, body) = split_frontmatter("---\ntitle: x\n---").unwrap();
        assert_eq!(yaml, "title: x");
        assert_eq!(body, "");
    }

    #[test]
    fn test_parse_blog() {
        let (data, body) = parse_entry(CollectionKind::Blog, Path::new("a.md"), BLOG).unwrap();
        let expected = EntryData::Blog(BlogData {
            title: "Building a blog".to_string(),
            description: "Notes on the stack".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            tags: vec!["rust".to_string(), "static-sites".to_string()],
        });
        assert_eq!(data, expected);
        assert_eq!(body, "# Hello\n\nBody text.\n");
    }

    #[test]
    fn test_blog_requires_description() {
        let content = "---\ntitle: t\ndate: 2024-01-01\n---\nbody";
        let err = parse_entry(CollectionKind::Blog, Path::new("x/y.md"), content).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("description"));
        assert!(err.to_string().contains("x/y.md"));
    }

    #[test]
    fn test_notes_default_tags() {
        let content = "---\ntitle: A note\ndate: 2023-02-03 10:11:12\n---\nbody";
        let (data, _) = parse_entry(CollectionKind::Notes, Path::new("n.md"), content).unwrap();
        assert_eq!(data.tags(), &["others".to_string()]);
        assert_eq!(data.description(), None);
    }

    #[test]
    fn test_invalid_tag() {
        let content = "---\ntitle: t\ndate: 2024-01-01\ntags: [Rust]\n---\n";
        let err = parse_entry(CollectionKind::Notes, Path::new("n.md"), content).err().unwrap();
        assert!(err.to_string().contains("Invalid tag `Rust`"));

        let content = "---\ntitle: t\ndate: 2024-01-01\ntags: [web--dev]\n---\n";
        assert!(parse_entry(CollectionKind::Notes, Path::new("n.md"), content).is_err());
    }

    #[test]
    fn test_invalid_date() {
        let content = "---\ntitle: t\ndate: soon\n---\n";
        let err = parse_entry(CollectionKind::Notes, Path::new("n.md"), content).err().unwrap();
        assert!(err.to_string().contains("Field `date`"));
    }

    #[test]
    fn test_missing_block() {
        let err = parse_entry(CollectionKind::Notes, Path::new("n.md"), "just text").err().unwrap();
        assert!(err.to_string().contains("Missing frontmatter"));
    }
}
