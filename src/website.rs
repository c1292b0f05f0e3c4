use std::io;

use spdlog::info;

use crate::config::Config;
use crate::content::collection::load_collection;
use crate::content::markdown::MarkdownRenderer;
use crate::content::routes::{content_routes, find_route, ContentRoute};
use crate::content::{CollectionKind, FormattedEntry};
use crate::feed::render_feed;
use crate::og::font::FontCache;
use crate::og::{og_image_for, OgError};
use crate::paginator::Paginator;
use crate::view::list_renderer::tags_by_frequency;
use crate::view::rss_renderer::full_link;
use crate::view::sitemap_renderer::Sitemap;
use crate::view::Views;

/// Everything needed to render the site: both collections, sorted newest
/// first, plus the parsed templates. Loaded once and never mutated.
pub struct Website {
    pub config: Config,
    pub blog: Vec<FormattedEntry>,
    pub notes: Vec<FormattedEntry>,
    views: Views,
    markdown: MarkdownRenderer,
    fonts: FontCache,
}

impl Website {
    pub fn load(config: Config) -> io::Result<Website> {
        let blog = load_collection(&config.paths.content_dir, CollectionKind::Blog)?;
        let notes = load_collection(&config.paths.content_dir, CollectionKind::Notes)?;
        let views = Views::load(&config.paths.template_dir)?;
        let markdown = MarkdownRenderer::with_themes(config.highlight_theme(), config.highlight_dark_theme());
        let fonts = FontCache::new(&config.paths.font_path);
        info!("Site loaded: {} posts, {} notes", blog.len(), notes.len());

        Ok(Website {
            config,
            blog,
            notes,
            views,
            markdown,
            fonts,
        })
    }

    pub fn collection(&self, kind: CollectionKind) -> &[FormattedEntry] {
        match kind {
            CollectionKind::Blog => &self.blog,
            CollectionKind::Notes => &self.notes,
        }
    }

    pub fn routes(&self, kind: CollectionKind) -> Vec<ContentRoute<'_>> {
        content_routes(self.collection(kind))
    }

    pub fn render_route(&self, route: &ContentRoute) -> io::Result<String> {
        let body = self.markdown.render(&route.post.entry.body)?;
        let og_image = full_link(&self.config.site.base_url, &route.post.og_image_path());
        Ok(self.views.post.render(&self.config.site.title, route, &body, &og_image))
    }

    /// Detail page for `slug`, `None` when the collection has no such entry.
    pub fn render_entry(&self, kind: CollectionKind, slug: &str) -> io::Result<Option<String>> {
        let routes = self.routes(kind);
        match find_route(&routes, slug) {
            Some(route) => self.render_route(&route).map(Some),
            None => Ok(None),
        }
    }

    /// One page of a collection listing. Out of range pages fall back to the first.
    pub fn render_list(&self, kind: CollectionKind, cur_page: u32) -> io::Result<String> {
        let entries = self.collection(kind);
        let paginator = Paginator::from(entries, self.config.defaults.page_size);
        let tags = tags_by_frequency(entries);

        if paginator.page_count() == 0 {
            return Ok(self.views.list.render(&self.config.site.title, kind.name(), &[], &tags, 1, 0));
        }

        let cur_page = paginator.sanitize_page(cur_page);
        let content_page = paginator.get_page(cur_page)
            .map_err(|desc| io::Error::new(io::ErrorKind::InvalidInput, desc))?;
        Ok(self.views.list.render(&self.config.site.title, kind.name(), content_page, &tags, cur_page, paginator.page_count()))
    }

    /// The whole collection on one page, used where there is no query string.
    pub fn render_full_list(&self, kind: CollectionKind) -> String {
        let entries = self.collection(kind);
        let tags = tags_by_frequency(entries);
        self.views.list.render(&self.config.site.title, kind.name(), entries, &tags, 1, 1)
    }

    /// Home page with the newest `page_size` entries across both collections.
    pub fn render_index(&self) -> String {
        let mut recent = crate::feed::merge_timeline(&self.blog, &self.notes);
        recent.truncate(self.config.defaults.page_size as usize);
        self.views.index.render(
            &self.config.site.title,
            &self.config.site.description,
            &recent,
            self.blog.len(),
            self.notes.len(),
        )
    }

    pub fn render_feed(&self) -> io::Result<Vec<u8>> {
        render_feed(&self.config, &self.blog, &self.notes)
    }

    /// Home, both listings and every entry page.
    pub fn render_sitemap(&self) -> io::Result<Vec<u8>> {
        let listings = ["/".to_string(), "/blog/".to_string(), "/notes/".to_string()];
        let entries = self.blog.iter().chain(self.notes.iter()).map(|e| e.permalink.clone());
        let paths: Vec<String> = listings.into_iter().chain(entries).collect();

        let sitemap = Sitemap { base_url: &self.config.site.base_url };
        sitemap.render(paths.iter().map(String::as_str))
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Error rendering sitemap: {}", e)))
    }

    pub fn render_og(&self, kind: CollectionKind, slug: &str) -> Result<Vec<u8>, OgError> {
        og_image_for(self.collection(kind), slug, &self.config.site.wordmark(), &self.fonts)
    }
}
