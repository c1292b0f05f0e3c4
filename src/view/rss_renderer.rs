use std::io::Cursor;

use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::FormattedEntry;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>olt's notes</title>
  <link>https://oltdaniel.eu</link>
  <description>Posts and notes about software</description>
  <item>
    <title>Building a blog</title>
    <link>https://oltdaniel.eu/blog/2024/building-a-blog</link>
    <guid isPermaLink="true">https://oltdaniel.eu/blog/2024/building-a-blog</guid>
    <description><![CDATA[Notes on the stack]]></description>
    <pubDate>Sat, 1 Jun 2024 00:00:00 +0000</pubDate>
    <category>rust</category>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, contents: &[&FormattedEntry]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8" ?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <rss version="2.0">
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;
        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for content in contents {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", content.title())?;

            let link = full_link(self.ch_link, content.permalink.as_str());
            push_text(&mut writer, "link", link.as_str())?;

            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(link.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            if let Some(description) = content.description() {
                push_cdata(&mut writer, "description", description)?;
            }

            // <pubDate>Sat, 1 Jun 2024 00:00:00 +0000</pubDate>
            let dt = Utc.from_utc_datetime(&content.entry.data.date());
            push_text(&mut writer, "pubDate", &dt.to_rfc2822())?;

            for tag in content.tags() {
                push_text(&mut writer, "category", tag)?;
            }

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

/// `https://site` + `/blog/2024/post` without doubled or missing slashes.
pub fn full_link(base_url: &str, link: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let link = link.trim_start_matches('/');
    format!("{}/{}", base_url, link)
}

pub(crate) fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use super::*;
    use crate::content::test_entries::{blog, date, note};

    #[test]
    fn render_xml() {
        let post = blog("2024/hello", date(2024, 1, 2));
        let n = note("a-note", date(2023, 5, 6));
        let contents = vec![&post, &n];

        let rss = RssChannel {
            ch_title: "my feed",
            ch_link: "https://oltdaniel.eu/",
            ch_desc: "My <blog> feed",
        };
        let xml = rss.render(&contents).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn test_full_link() {
        assert_eq!(full_link("https://a.eu", "/notes/x"), "https://a.eu/notes/x");
        assert_eq!(full_link("https://a.eu/", "notes/x"), "https://a.eu/notes/x");
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><link>https://oltdaniel.eu/</link><description>My &lt;blog&gt; feed</description><item><title>Post 2024/hello</title><link>https://oltdaniel.eu/blog/2024/hello</link><guid isPermaLink="true">https://oltdaniel.eu/blog/2024/hello</guid><description><![CDATA[About 2024/hello]]></description><pubDate>Tue, 2 Jan 2024 00:00:00 +0000</pubDate><category>rust</category><category>web-dev</category></item><item><title>Note a-note</title><link>https://oltdaniel.eu/notes/a-note</link><guid isPermaLink="true">https://oltdaniel.eu/notes/a-note</guid><pubDate>Sat, 6 May 2023 00:00:00 +0000</pubDate><category>others</category></item></channel></rss>"##;
}
