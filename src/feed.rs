use std::io;
use std::io::ErrorKind;

use spdlog::info;

use crate::config::Config;
use crate::content::collection::load_collection;
use crate::content::{sort_by_date, CollectionKind, FormattedEntry};
use crate::view::rss_renderer::RssChannel;

/// Blog and notes merged into one timeline, newest first.
/// Entries sharing a date keep blog-before-notes order.
pub fn merge_timeline<'a>(blog: &'a [FormattedEntry], notes: &'a [FormattedEntry]) -> Vec<&'a FormattedEntry> {
    let mut all: Vec<&FormattedEntry> = blog.iter().chain(notes.iter()).collect();
    all.sort_by(sort_by_date);
    all
}

pub fn render_feed(config: &Config, blog: &[FormattedEntry], notes: &[FormattedEntry]) -> io::Result<Vec<u8>> {
    let all_content = merge_timeline(blog, notes);
    let channel = RssChannel {
        ch_title: &config.site.title,
        ch_link: &config.site.base_url,
        ch_desc: &config.site.description,
    };
    channel.render(&all_content)
        .map_err(|e| io::Error::new(ErrorKind::Other, format!("Error rendering RSS feed: {}", e)))
}

/// Loads both collections and renders the RSS document. Any load failure fails the feed.
pub fn build_feed(config: &Config) -> io::Result<Vec<u8>> {
    let blog = load_collection(&config.paths.content_dir, CollectionKind::Blog)?;
    let notes = load_collection(&config.paths.content_dir, CollectionKind::Notes)?;
    info!("Building feed with {} posts and {} notes", blog.len(), notes.len());
    render_feed(config, &blog, &notes)
}
