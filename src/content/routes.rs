use crate::content::{sort_by_date, FormattedEntry};

/// One detail page: the entry and its neighbours on the timeline.
///
/// `prev_post` is the older neighbour, `next_post` the newer one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentRoute<'a> {
    pub slug: &'a str,
    pub post: &'a FormattedEntry,
    pub prev_post: Option<&'a FormattedEntry>,
    pub next_post: Option<&'a FormattedEntry>,
}

/// Sorts `collection` newest first in place and pairs every entry with its neighbours.
pub fn prepare_content_posts(collection: &mut [FormattedEntry]) -> Vec<ContentRoute<'_>> {
    collection.sort_by(sort_by_date);
    content_routes(collection)
}

/// Neighbour pairing over a collection that is already sorted newest first.
pub fn content_routes(collection: &[FormattedEntry]) -> Vec<ContentRoute<'_>> {
    collection.iter()
        .enumerate()
        .map(|(i, post)| ContentRoute {
            slug: post.slug.as_str(),
            post,
            prev_post: collection.get(i + 1),
            next_post: i.checked_sub(1).and_then(|prev| collection.get(prev)),
        })
        .collect()
}

/// Route of a single slug, `None` when no entry carries it.
pub fn find_route<'a>(routes: &[ContentRoute<'a>], slug: &str) -> Option<ContentRoute<'a>> {
    routes.iter().find(|r| r.slug == slug).copied()
}
