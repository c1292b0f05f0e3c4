use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::FormattedEntry;
use crate::text_utils::format_date_time;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_title: &'a str,
    collection: &'a str,
    post_list: Vec<PostItem<'a>>,
    tags: Vec<ViewTag<'a>>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
pub(crate) struct PostItem<'a> {
    date: String,
    time: String,
    link: &'a str,
    title: &'a str,
    kind: &'a str,
    summary: &'a str,
}

impl<'a> PostItem<'a> {
    pub(crate) fn from_entry(entry: &'a FormattedEntry) -> Self {
        let (date, time) = format_date_time(&entry.entry.data.date());
        PostItem {
            date,
            time,
            link: entry.permalink.as_str(),
            title: entry.title(),
            kind: entry.kind().name(),
            summary: entry.description().unwrap_or_default(),
        }
    }
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
}

/// Tags of `entries`, most used first. Equal counts are ordered by name.
pub fn tags_by_frequency(entries: &[FormattedEntry]) -> Vec<&str> {
    let mut tag_map: HashMap<&str, u32> = HashMap::new();
    for entry in entries {
        for tag in entry.tags() {
            *tag_map.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tag_list: Vec<(&str, u32)> = tag_map.into_iter().collect();
    tag_list.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));
    tag_list.into_iter().map(|(k, _)| k).collect()
}

pub struct ListRenderer {
    pub template: Template<'static>,
}

impl ListRenderer {
    pub fn new(list_tpl_src: impl Into<String>) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src.into()) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    /// One page of a collection listing. `page_count` of 0 or 1 hides the pagination block.
    pub fn render(&self,
                  site_title: &str,
                  collection: &str,
                  contents: &[FormattedEntry],
                  tags: &[&str],
                  cur_page: u32,
                  page_count: u32) -> String {
        let post_list = contents.iter().map(PostItem::from_entry).collect();

        let page_list = (1..=page_count)
            .map(|number| ViewPagination {
                current: number == cur_page,
                number,
            })
            .collect();

        let tags = tags.iter().map(|t| ViewTag { tag: t }).collect();
        self.template.render(&ListPage {
            site_title,
            collection,
            post_list,
            tags,
            page_list,
            show_pagination: page_count > 1,
        })
    }
}
