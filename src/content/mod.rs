use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use chrono::{Datelike, NaiveDateTime};

pub mod collection;
pub mod frontmatter;
pub mod markdown;
pub mod routes;

/// The two declared collections. Each lives in its own directory below `content_dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Blog,
    Notes,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Blog, CollectionKind::Notes];

    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Blog => "blog",
            CollectionKind::Notes => "notes",
        }
    }

    /// Width of the fixed prefix removed from an entry path before it becomes a slug.
    /// Blog entries are stored as `YYYY-MM-DD-name`, notes as `YYYY-name`.
    pub fn prefix_len(&self) -> usize {
        match self {
            CollectionKind::Blog => 11,
            CollectionKind::Notes => 5,
        }
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogData {
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteData {
    pub title: String,
    pub date: NaiveDateTime,
    pub tags: Vec<String>,
}

/// Validated frontmatter, one shape per collection.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryData {
    Blog(BlogData),
    Notes(NoteData),
}

impl EntryData {
    pub fn kind(&self) -> CollectionKind {
        match self {
            EntryData::Blog(_) => CollectionKind::Blog,
            EntryData::Notes(_) => CollectionKind::Notes,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            EntryData::Blog(data) => &data.title,
            EntryData::Notes(data) => &data.title,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            EntryData::Blog(data) => Some(&data.description),
            EntryData::Notes(_) => None,
        }
    }

    pub fn date(&self) -> NaiveDateTime {
        match self {
            EntryData::Blog(data) => data.date,
            EntryData::Notes(data) => data.date,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            EntryData::Blog(data) => &data.tags,
            EntryData::Notes(data) => &data.tags,
        }
    }
}

/// One source file of a collection, as loaded at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    /// Path relative to the collection directory, with `/` separators.
    pub id: String,
    pub file_path: PathBuf,
    pub data: EntryData,
    pub body: String,
}

impl ContentEntry {
    pub fn kind(&self) -> CollectionKind {
        self.data.kind()
    }

    pub fn year(&self) -> i32 {
        self.data.date().year()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedEntry {
    pub entry: ContentEntry,
    pub slug: String,
    pub permalink: String,
}

impl FormattedEntry {
    pub fn title(&self) -> &str {
        self.entry.data.title()
    }

    pub fn description(&self) -> Option<&str> {
        self.entry.data.description()
    }

    pub fn tags(&self) -> &[String] {
        self.entry.data.tags()
    }

    pub fn kind(&self) -> CollectionKind {
        self.entry.kind()
    }

    pub fn og_image_path(&self) -> String {
        format!("{}/og.png", self.permalink)
    }
}

/// Anything that can be placed on the timeline.
pub trait Dated {
    fn date(&self) -> NaiveDateTime;
}

impl Dated for ContentEntry {
    fn date(&self) -> NaiveDateTime {
        self.data.date()
    }
}

impl Dated for FormattedEntry {
    fn date(&self) -> NaiveDateTime {
        self.entry.date()
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> NaiveDateTime {
        (**self).date()
    }
}

/// Newest first. Equal dates compare `Equal`, so a stable sort keeps input order.
pub fn sort_by_date<T: Dated>(a: &T, b: &T) -> Ordering {
    b.date().cmp(&a.date())
}


#[cfg(test)]
mod tests {
    use super::test_entries::*;
    use super::*;

    #[test]
    fn test_sort_by_date_descending() {
        let mut entries = vec![
            note("a", date(2023, 1, 1)),
            note("b", date(2024, 6, 1)),
            note("c", date(2022, 12, 31)),
        ];
        entries.sort_by(sort_by_date);
        let dates: Vec<_> = entries.iter().map(|e| e.date()).collect();
        assert_eq!(dates, vec![date(2024, 6, 1), date(2023, 1, 1), date(2022, 12, 31)]);
    }

    #[test]
    fn test_sort_by_date_is_stable_on_ties() {
        let mut entries = vec![
            note("first", date(2024, 1, 1)),
            note("newer", date(2024, 2, 1)),
            note("second", date(2024, 1, 1)),
        ];
        entries.sort_by(sort_by_date);
        let slugs: Vec<_> = entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "first", "second"]);
    }

    #[test]
    fn test_entry_accessors() {
        let post = blog("2024/hello", date(2024, 3, 4));
        assert_eq!(post.kind(), CollectionKind::Blog);
        assert_eq!(post.description(), Some("About 2024/hello"));
        assert_eq!(post.og_image_path(), "/blog/2024/hello/og.png");

        let n = note("hello", date(2024, 3, 4));
        assert_eq!(n.description(), None);
        assert_eq!(n.entry.year(), 2024);
        assert_eq!(n.kind().to_string(), "notes");
    }
}
