use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use lazy_static::lazy_static;
use regex::Regex;
use spdlog::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::frontmatter::parse_entry;
use crate::content::{sort_by_date, CollectionKind, ContentEntry, FormattedEntry};

/// Files of one collection directory, `content_dir/<collection>`.
pub struct CollectionDir {
    pub root_dir: PathBuf,
    pub kind: CollectionKind,
}

impl CollectionDir {
    pub fn new(content_dir: &Path, kind: CollectionKind) -> Self {
        CollectionDir {
            root_dir: content_dir.join(kind.name()),
            kind,
        }
    }

    /// Every `.md`/`.mdx` file below the collection directory, in path order.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = vec![];
        if !self.root_dir.is_dir() {
            warn!("Collection directory {} does not exist, {} is empty", self.root_dir.display(), self.kind);
            return Ok(files);
        }

        for entry in WalkDir::new(&self.root_dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_content = matches!(
                entry.path().extension().and_then(|e| e.to_str()),
                Some("md") | Some("mdx")
            );
            if is_content {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Identifier of a file: its path relative to the collection directory, `/`-separated.
    fn entry_id(&self, file_path: &Path) -> io::Result<String> {
        let relative = file_path.strip_prefix(&self.root_dir)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
        let parts: Vec<String> = relative.components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Ok(parts.join("/"))
    }

    pub fn load_entries(&self) -> io::Result<Vec<ContentEntry>> {
        let mut entries = vec![];
        for file_path in self.retrieve_files()? {
            let raw_content = fs::read_to_string(&file_path)?;
            let (data, body) = parse_entry(self.kind, &file_path, &raw_content)?;
            let id = self.entry_id(&file_path)?;
            debug!("Loaded {} entry {}", self.kind, id);
            entries.push(ContentEntry {
                id,
                file_path,
                data,
                body,
            });
        }
        Ok(entries)
    }
}

/// Removes a trailing `/index.md(x)` or `.md(x)`.
pub fn strip_entry_suffix(id: &str) -> String {
    lazy_static! {
        static ref SUFFIX_REGEX: Regex = Regex::new(r"(/index)?\.mdx?$").unwrap();
    }
    SUFFIX_REGEX.replace(id, "").to_string()
}

fn strip_prefix_chars(id: &str, count: usize) -> &str {
    match id.char_indices().nth(count) {
        Some((idx, _)) => &id[idx..],
        None => "",
    }
}

/// `2024-06-01-my-post/index.md` dated 2024 becomes `2024/my-post`.
pub fn blog_slug(entry: &ContentEntry) -> String {
    let id = strip_prefix_chars(&entry.id, CollectionKind::Blog.prefix_len());
    strip_entry_suffix(&format!("{}/{}", entry.year(), id))
}

/// `2024-my-note.md` becomes `my-note`.
pub fn notes_slug(entry: &ContentEntry) -> String {
    let id = strip_prefix_chars(&entry.id, CollectionKind::Notes.prefix_len());
    strip_entry_suffix(id)
}

pub fn slug_rule(kind: CollectionKind) -> fn(&ContentEntry) -> String {
    match kind {
        CollectionKind::Blog => blog_slug,
        CollectionKind::Notes => notes_slug,
    }
}

pub fn collection_permalink(entry: &ContentEntry, slug: &str) -> String {
    format!("/{}/{}", entry.kind().name(), slug)
}

/// Loads and validates every entry of a collection, then attaches slug and permalink.
///
/// Fails when any file has invalid frontmatter, or when two entries end up with the
/// same slug, or a slug is empty.
pub fn load_and_format_collection<S, P>(
    content_dir: &Path,
    kind: CollectionKind,
    map_slug: S,
    map_permalink: P,
) -> io::Result<Vec<FormattedEntry>>
where
    S: Fn(&ContentEntry) -> String,
    P: Fn(&ContentEntry, &str) -> String,
{
    let entries = CollectionDir::new(content_dir, kind).load_entries()?;

    let mut seen = HashSet::new();
    let mut formatted = Vec::with_capacity(entries.len());
    for entry in entries {
        let slug = map_slug(&entry);
        if slug.is_empty() {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Empty slug for {} entry - file={}", kind, entry.file_path.display())));
        }
        if !seen.insert(slug.clone()) {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Duplicate slug `{}` in {} - file={}", slug, kind, entry.file_path.display())));
        }
        let permalink = map_permalink(&entry, &slug);
        formatted.push(FormattedEntry { entry, slug, permalink });
    }

    Ok(formatted)
}

/// Collection with its own slug rule and `/{collection}/{slug}` permalinks, newest first.
pub fn load_collection(content_dir: &Path, kind: CollectionKind) -> io::Result<Vec<FormattedEntry>> {
    let mut entries = load_and_format_collection(content_dir, kind, slug_rule(kind), collection_permalink)?;
    entries.sort_by(sort_by_date);
    info!("Loaded {} {} entries", entries.len(), kind);
    Ok(entries)
}
