use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::domain::model::{Feed, FeedItem};
use crate::utils::error::{Result, SieveError};

/// Parse an RSS document from raw XML bytes into the [`Feed`] model.
///
/// Entities and CDATA sections are decoded here; `pubDate` is kept as the
/// verbatim source string. `<dc:creator>` takes precedence over `<author>`
/// when both are present on an item.
pub fn parse_feed(xml: &[u8]) -> Result<Feed> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut feed = Feed::default();
    let mut buf = Vec::new();

    let mut current_item: Option<FeedItemBuilder> = None;
    let mut current_element = String::new();
    let mut saw_channel = false;
    let mut in_image = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                match name.as_str() {
                    "channel" => saw_channel = true,
                    "item" => current_item = Some(FeedItemBuilder::default()),
                    "image" => in_image = true,
                    _ => {}
                }
                current_element = name;
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                match name.as_str() {
                    "item" => {
                        if let Some(builder) = current_item.take() {
                            feed.items.push(builder.build());
                        }
                    }
                    "image" => in_image = false,
                    _ => {}
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| SieveError::parse(format!("XML parse error: {}", e)))?;
                append_text(
                    &mut feed,
                    &mut current_item,
                    &current_element,
                    in_image,
                    &text,
                );
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                append_text(
                    &mut feed,
                    &mut current_item,
                    &current_element,
                    in_image,
                    &text,
                );
            }
            Ok(Event::Eof) => {
                if current_item.is_some() {
                    return Err(SieveError::parse("unexpected end of document inside <item>"));
                }
                break;
            }
            Err(e) => return Err(SieveError::parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    if !saw_channel {
        return Err(SieveError::parse("document has no <channel> element"));
    }

    Ok(feed)
}

fn append_text(
    feed: &mut Feed,
    current_item: &mut Option<FeedItemBuilder>,
    current_element: &str,
    in_image: bool,
    text: &str,
) {
    if text.is_empty() || in_image {
        return;
    }

    if let Some(item) = current_item {
        match current_element {
            "title" => push(&mut item.title, text),
            "link" => push(&mut item.link, text),
            "author" => push(&mut item.author, text),
            "dc:creator" => push(&mut item.creator, text),
            "pubDate" => push(&mut item.pub_date, text),
            "description" => push(&mut item.description, text),
            _ => {}
        }
    } else {
        match current_element {
            "title" => push(&mut feed.title, text),
            "link" => push(&mut feed.link, text),
            "description" => push(&mut feed.description, text),
            _ => {}
        }
    }
}

// Append so text split across entity/CDATA boundaries is not lost.
fn push(field: &mut Option<String>, text: &str) {
    field.get_or_insert_with(String::new).push_str(text);
}

#[derive(Default)]
struct FeedItemBuilder {
    title: Option<String>,
    link: Option<String>,
    author: Option<String>,
    creator: Option<String>,
    pub_date: Option<String>,
    description: Option<String>,
}

impl FeedItemBuilder {
    fn build(self) -> FeedItem {
        FeedItem {
            title: self.title,
            link: self.link,
            author: self.creator.or(self.author),
            pub_date: self.pub_date,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Example Blog</title>
    <link>https://example.com</link>
    <description>Posts &amp; notes</description>
    <item>
      <title>First &lt;post&gt;</title>
      <link>https://example.com/alice/1</link>
      <dc:creator>Alice</dc:creator>
      <pubDate>Mon, 01 Jan 2024 00:00:00 +0000</pubDate>
      <description><![CDATA[Contains <b>markup</b> & specials]]></description>
    </item>
    <item>
      <title>Second post</title>
      <link>https://example.com/bob/2</link>
      <author>bob@example.com (Bob)</author>
    </item>
    <item>
      <title>Anonymous post</title>
    </item>
  </channel>
</rss>
"#;

    #[test]
    fn test_parses_channel_fields() {
        let feed = parse_feed(SAMPLE.as_bytes()).unwrap();
        assert_eq!(feed.title.as_deref(), Some("Example Blog"));
        assert_eq!(feed.link.as_deref(), Some("https://example.com"));
        assert_eq!(feed.description.as_deref(), Some("Posts & notes"));
    }

    #[test]
    fn test_parses_items_in_order() {
        let feed = parse_feed(SAMPLE.as_bytes()).unwrap();
        assert_eq!(feed.items.len(), 3);

        let first = &feed.items[0];
        assert_eq!(first.title.as_deref(), Some("First <post>"));
        assert_eq!(first.link.as_deref(), Some("https://example.com/alice/1"));
        assert_eq!(first.author.as_deref(), Some("Alice"));
        assert_eq!(
            first.pub_date.as_deref(),
            Some("Mon, 01 Jan 2024 00:00:00 +0000")
        );
        assert_eq!(
            first.description.as_deref(),
            Some("Contains <b>markup</b> & specials")
        );

        let second = &feed.items[1];
        assert_eq!(second.author.as_deref(), Some("bob@example.com (Bob)"));
        assert_eq!(second.pub_date, None);

        let third = &feed.items[2];
        assert_eq!(third.title.as_deref(), Some("Anonymous post"));
        assert_eq!(third.author, None);
        assert_eq!(third.link, None);
    }

    #[test]
    fn test_creator_wins_over_author() {
        let xml = r#"<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/"><channel>
            <item><author>mail@example.com</author><dc:creator>alice</dc:creator></item>
        </channel></rss>"#;
        let feed = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(feed.items[0].author.as_deref(), Some("alice"));
    }

    #[test]
    fn test_image_title_does_not_clobber_channel_title() {
        let xml = r#"<rss version="2.0"><channel>
            <title>Real Title</title>
            <image><title>Logo</title><url>https://example.com/logo.png</url></image>
        </channel></rss>"#;
        let feed = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(feed.title.as_deref(), Some("Real Title"));
    }

    #[test]
    fn test_rejects_document_without_channel() {
        let err = parse_feed(b"<html><body>not a feed</body></html>").unwrap_err();
        assert!(matches!(err, SieveError::Parse { .. }));
    }

    #[test]
    fn test_rejects_truncated_document() {
        let xml = r#"<rss version="2.0"><channel><item><title>cut"#;
        assert!(parse_feed(xml.as_bytes()).is_err());
    }
}
