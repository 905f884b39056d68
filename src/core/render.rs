use crate::domain::model::{Feed, RenderedFeed};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml";

const DEFAULT_CHANNEL_TITLE: &str = "Filtered Feed";
const DEFAULT_CHANNEL_DESCRIPTION: &str = "Filtered RSS feed";

#[derive(Debug, Serialize)]
struct JsonFeed<'a> {
    title: &'a str,
    description: &'a str,
    link: &'a str,
    items: Vec<JsonItem<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonItem<'a> {
    title: &'a str,
    link: &'a str,
    author: &'a str,
    #[serde(rename = "pubDate")]
    pub_date: &'a str,
    description: &'a str,
}

/// Render the feed as a JSON document. Absent fields become empty strings,
/// except an absent item author, which becomes the literal "Unknown".
pub fn render_json(feed: &Feed) -> Result<RenderedFeed> {
    let items = feed
        .items
        .iter()
        .map(|item| JsonItem {
            title: item.title.as_deref().unwrap_or(""),
            link: item.link.as_deref().unwrap_or(""),
            author: item.author.as_deref().unwrap_or("Unknown"),
            pub_date: item.pub_date.as_deref().unwrap_or(""),
            description: item.description.as_deref().unwrap_or(""),
        })
        .collect();

    let doc = JsonFeed {
        title: feed.title.as_deref().unwrap_or(""),
        description: feed.description.as_deref().unwrap_or(""),
        link: feed.link.as_deref().unwrap_or(""),
        items,
    };

    Ok(RenderedFeed {
        content_type: JSON_CONTENT_TYPE,
        body: serde_json::to_string(&doc)?,
    })
}

/// Regenerate the feed as an RSS 2.0 document.
///
/// Text content is entity-escaped exactly once here; the parser already
/// unescaped it on the way in. Item `pubDate` falls back to `now` when the
/// source carried none, and `<dc:creator>` is emitted only for items that
/// have an author.
pub fn render_rss(feed: &Feed, language: &str, now: DateTime<Utc>) -> RenderedFeed {
    let now_rfc2822 = now.to_rfc2822();

    let mut xml = String::with_capacity(1024);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n");
    xml.push_str("  <channel>\n");
    push_element(
        &mut xml,
        4,
        "title",
        feed.title.as_deref().unwrap_or(DEFAULT_CHANNEL_TITLE),
    );
    push_element(&mut xml, 4, "link", feed.link.as_deref().unwrap_or(""));
    push_element(
        &mut xml,
        4,
        "description",
        feed.description
            .as_deref()
            .unwrap_or(DEFAULT_CHANNEL_DESCRIPTION),
    );
    push_element(&mut xml, 4, "language", language);
    push_element(&mut xml, 4, "lastBuildDate", &now_rfc2822);

    for item in &feed.items {
        xml.push_str("    <item>\n");
        push_element(&mut xml, 6, "title", item.title.as_deref().unwrap_or(""));
        let link = item.link.as_deref().unwrap_or("");
        push_element(&mut xml, 6, "link", link);
        push_element(&mut xml, 6, "guid", link);
        push_element(
            &mut xml,
            6,
            "pubDate",
            item.pub_date.as_deref().unwrap_or(&now_rfc2822),
        );
        push_element(
            &mut xml,
            6,
            "description",
            item.description.as_deref().unwrap_or(""),
        );
        if let Some(author) = item.author.as_deref() {
            push_element(&mut xml, 6, "dc:creator", author);
        }
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");

    RenderedFeed {
        content_type: RSS_CONTENT_TYPE,
        body: xml,
    }
}

fn push_element(xml: &mut String, indent: usize, name: &str, text: &str) {
    for _ in 0..indent {
        xml.push(' ');
    }
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    xml.push_str(&escape(text));
    xml.push_str("</");
    xml.push_str(name);
    xml.push_str(">\n");
}
