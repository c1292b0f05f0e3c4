use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::routes::ContentRoute;
use crate::content::FormattedEntry;
use crate::text_utils::format_date_time;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct NavLink<'a> {
    title: &'a str,
    link: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    site_title: &'a str,
    collection: &'a str,
    slug: &'a str,
    permalink: &'a str,
    og_image: &'a str,
    tags: Vec<ViewTag<'a>>,
    date: &'a str,
    time: &'a str,
    post_title: &'a str,
    has_description: bool,
    description: &'a str,
    post_content: &'a str,
    prev_post: Option<NavLink<'a>>,
    next_post: Option<NavLink<'a>>,
}

fn nav_link(entry: Option<&FormattedEntry>) -> Option<NavLink<'_>> {
    entry.map(|e| NavLink {
        title: e.title(),
        link: e.permalink.as_str(),
    })
}

pub struct PostRenderer {
    pub template: Template<'static>,
}

impl PostRenderer {
    pub fn new(view_tpl_src: impl Into<String>) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src.into()) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    /// Detail page of `route.post`. `og_image` is the absolute URL of its card.
    pub fn render(&self, site_title: &str, route: &ContentRoute, rendered_body: &str, og_image: &str) -> String {
        let post = route.post;
        let tags: Vec<ViewTag> = post.tags().iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let (date, time) = format_date_time(&post.entry.data.date());

        self.template.render(&ViewItem {
            site_title,
            collection: post.kind().name(),
            slug: route.slug,
            permalink: post.permalink.as_str(),
            og_image,
            tags,
            date: date.as_str(),
            time: time.as_str(),
            post_title: post.title(),
            has_description: post.description().is_some(),
            description: post.description().unwrap_or_default(),
            post_content: rendered_body,
            prev_post: nav_link(route.prev_post),
            next_post: nav_link(route.next_post),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::routes::prepare_content_posts;
    use crate::content::test_entries::{blog, date, note};

    #[test]
    fn render_view() {
        let template_src = r##"
SITE=[{{site_title}}]
TITLE=[{{post_title}}]
KIND=[{{collection}}]
DATE=[{{date}}]
TIME=[{{time}}]
DESC=[{{#has_description}}{{description}}{{/has_description}}]
TAGS=[{{#tags}}({{tag}}){{/tags}}]
OG=[{{og_image}}]
PREV=[{{#prev_post}}{{title}}@{{link}}{{/prev_post}}]
NEXT=[{{#next_post}}{{title}}@{{link}}{{/next_post}}]
POST_CONTENT=[{{{post_content}}}]
"##;
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let mut entries = vec![
            blog("2024/new", date(2024, 3, 1)),
            blog("2024/mid", date(2024, 2, 1)),
            blog("2024/old", date(2024, 1, 1)),
        ];
        let routes = prepare_content_posts(&mut entries);

        let res = post_renderer.render("<olt>", &routes[1], "<p>body</p>", "https://a.eu/blog/2024/mid/og.png");
        assert_eq!(res, r##"
SITE=[&lt;olt&gt;]
TITLE=[Post 2024/mid]
KIND=[blog]
DATE=[2024-02-01]
TIME=[00:00:00]
DESC=[About 2024/mid]
TAGS=[(rust)(web-dev)]
OG=[https://a.eu/blog/2024/mid/og.png]
PREV=[Post 2024/old@/blog/2024/old]
NEXT=[Post 2024/new@/blog/2024/new]
POST_CONTENT=[<p>body</p>]"##);
    }

    #[test]
    fn render_note_without_neighbours() {
        let template_src = "{{post_title}}|{{#has_description}}D{{/has_description}}|{{#prev_post}}P{{/prev_post}}|{{#next_post}}N{{/next_post}}";
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let mut entries = vec![note("alone", date(2024, 1, 1))];
        let routes = prepare_content_posts(&mut entries);
        let res = post_renderer.render("site", &routes[0], "", "");
        assert_eq!(res, "Note alone|||");
    }
}
