use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::FormattedEntry;
use crate::view::list_renderer::PostItem;

#[derive(ramhorns::Content)]
struct IndexPage<'a> {
    site_title: &'a str,
    site_description: &'a str,
    blog_count: u32,
    notes_count: u32,
    recent: Vec<PostItem<'a>>,
}

pub struct IndexRenderer {
    pub template: Template<'static>,
}

impl IndexRenderer {
    pub fn new(index_tpl_src: impl Into<String>) -> io::Result<IndexRenderer> {
        let template = Template::new(index_tpl_src.into())
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Error parsing index template: {}", e)))?;
        Ok(IndexRenderer { template })
    }

    /// Home page. `recent` is expected newest first, already cut to size.
    pub fn render(&self,
                  site_title: &str,
                  site_description: &str,
                  recent: &[&FormattedEntry],
                  blog_count: usize,
                  notes_count: usize) -> String {
        self.template.render(&IndexPage {
            site_title,
            site_description,
            blog_count: blog_count as u32,
            notes_count: notes_count as u32,
            recent: recent.iter().map(|e| PostItem::from_entry(e)).collect(),
        })
    }
}
