use std::fs;
use std::io;
use std::path::Path;

use crate::view::index_renderer::IndexRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;

pub mod index_renderer;
pub mod list_renderer;
pub mod post_renderer;
pub mod rss_renderer;
pub mod sitemap_renderer;

pub const POST_TEMPLATE: &str = "post.tpl";
pub const LIST_TEMPLATE: &str = "list.tpl";
pub const INDEX_TEMPLATE: &str = "index.tpl";

/// The three page templates, parsed once.
pub struct Views {
    pub post: PostRenderer,
    pub list: ListRenderer,
    pub index: IndexRenderer,
}

fn read_template(template_dir: &Path, name: &str) -> io::Result<String> {
    let template_path = template_dir.join(name);
    fs::read_to_string(&template_path)
        .map_err(|e| io::Error::new(e.kind(), format!("Error reading template {}: {}", template_path.display(), e)))
}

impl Views {
    pub fn load(template_dir: &Path) -> io::Result<Views> {
        Ok(Views {
            post: PostRenderer::new(read_template(template_dir, POST_TEMPLATE)?)?,
            list: ListRenderer::new(read_template(template_dir, LIST_TEMPLATE)?)?,
            index: IndexRenderer::new(read_template(template_dir, INDEX_TEMPLATE)?)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::ErrorKind;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    pub(crate) const POST_TPL: &str = "<h1>{{post_title}}</h1>\
        <meta property=\"og:image\" content=\"{{og_image}}\">\
        {{#prev_post}}<a class=\"prev\" href=\"{{link}}\">{{title}}</a>{{/prev_post}}\
        {{#next_post}}<a class=\"next\" href=\"{{link}}\">{{title}}</a>{{/next_post}}\
        <article>{{{post_content}}}</article>";
    pub(crate) const LIST_TPL: &str = "<h1>{{collection}}</h1>{{#post_list}}<a href=\"{{link}}\">{{title}}</a>{{/post_list}}\
        {{#show_pagination}}{{#page_list}}<a href=\"?page={{number}}\">{{number}}</a>{{/page_list}}{{/show_pagination}}";
    pub(crate) const INDEX_TPL: &str = "<h1>{{site_title}}</h1>{{#recent}}<a href=\"{{link}}\">{{title}}</a>{{/recent}}";

    pub(crate) fn write_templates(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(POST_TEMPLATE), POST_TPL).unwrap();
        fs::write(dir.join(LIST_TEMPLATE), LIST_TPL).unwrap();
        fs::write(dir.join(INDEX_TEMPLATE), INDEX_TPL).unwrap();
    }

    #[test]
    fn test_load_views() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        assert!(Views::load(dir.path()).is_ok());
    }

    #[test]
    fn test_missing_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(POST_TEMPLATE), POST_TPL).unwrap();
        let err = Views::load(dir.path()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains(LIST_TEMPLATE));
    }
}
