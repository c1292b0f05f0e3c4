use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::view::rss_renderer::{full_link, push_text};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://oltdaniel.eu/</loc></url>
  <url><loc>https://oltdaniel.eu/blog/2024/building-a-blog</loc></url>
</urlset>
*/

pub struct Sitemap<'a> {
    pub base_url: &'a str,
}

impl Sitemap<'_> {
    /// One `<url>` per site path, in the given order.
    pub fn render<'p>(&self, paths: impl IntoIterator<Item = &'p str>) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for path in paths {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            push_text(&mut writer, "loc", &full_link(self.base_url, path))?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;
        Ok(writer.into_inner().into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::str;

    use super::*;

    #[test]
    fn render_sitemap() {
        let sitemap = Sitemap { base_url: "https://oltdaniel.eu/" };
        let xml = sitemap.render(["/", "/blog/", "/blog/2024/a&b"]).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), r##"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>https://oltdaniel.eu/</loc></url><url><loc>https://oltdaniel.eu/blog/</loc></url><url><loc>https://oltdaniel.eu/blog/2024/a&amp;b</loc></url></urlset>"##);
    }

    #[test]
    fn render_empty_sitemap() {
        let sitemap = Sitemap { base_url: "https://a.eu" };
        let xml = sitemap.render([]).unwrap();
        assert!(str::from_utf8(&xml).unwrap().ends_with(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#));
    }
}
