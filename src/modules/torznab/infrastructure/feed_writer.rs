use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::modules::torznab::domain::{category_id_for, FeedItem};
use crate::shared::errors::AppResult;

pub const CHANNEL_TITLE: &str = "Seedable - Cross-Seed Filter";
pub const CHANNEL_DESCRIPTION: &str = "Filtered torrents available on 2+ trackers";
const TORZNAB_NS: &str = "http://torznab.com/schemas/2015/feed";
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Thin helper over `quick_xml::Writer` for element-per-line documents
pub(crate) struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    pub(crate) fn new() -> AppResult<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        Ok(Self { writer })
    }

    pub(crate) fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> AppResult<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    pub(crate) fn close(&mut self, name: &str) -> AppResult<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> AppResult<()> {
        let mut element = BytesStart::new(name);
        for attribute in attributes {
            element.push_attribute(*attribute);
        }
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    /// `<name>text</name>`, with `text` escaped
    pub(crate) fn text_element(&mut self, name: &str, text: &str) -> AppResult<()> {
        self.open(name, &[])?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    pub(crate) fn finish(self) -> AppResult<String> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

/// Renders filtered releases as a Torznab RSS feed
pub struct FeedWriter {
    /// Base URL reported as the channel link
    site_link: String,
    apply_labels: bool,
}

impl FeedWriter {
    pub fn new(site_link: impl Into<String>, apply_labels: bool) -> Self {
        Self {
            site_link: site_link.into(),
            apply_labels,
        }
    }

    pub fn render(&self, items: &[FeedItem]) -> AppResult<String> {
        self.render_at(items, Utc::now())
    }

    /// Render with a fixed "now" for releases without a usable date
    pub fn render_at(&self, items: &[FeedItem], now: DateTime<Utc>) -> AppResult<String> {
        log::info!("Building XML for {} results", items.len());

        let mut doc = XmlDocument::new()?;
        doc.open(
            "rss",
            &[
                ("version", "2.0"),
                ("xmlns:torznab", TORZNAB_NS),
                ("xmlns:atom", ATOM_NS),
            ],
        )?;
        doc.open("channel", &[])?;
        doc.text_element("title", CHANNEL_TITLE)?;
        doc.text_element("description", CHANNEL_DESCRIPTION)?;
        doc.text_element("link", &self.site_link)?;

        for (index, item) in items.iter().enumerate() {
            self.write_item(&mut doc, index, item, now)?;
        }

        doc.close("channel")?;
        doc.close("rss")?;
        let xml = doc.finish()?;

        log::info!(
            "Generated XML with {} items, {} bytes",
            items.len(),
            xml.len()
        );
        Ok(xml)
    }

    fn write_item(
        &self,
        doc: &mut XmlDocument,
        index: usize,
        item: &FeedItem,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let release = &item.release;
        let title = item.display_title(self.apply_labels);
        let guid = release
            .search_result_id
            .clone()
            .unwrap_or_else(|| index.to_string());
        let size = release.size.to_string();
        let category_id = category_id_for(&release.category);
        let indexer = if release.indexer.is_empty() {
            "Unknown"
        } else {
            release.indexer.as_str()
        };
        let download_factor = if release.is_freeleech() { "0" } else { "1" };

        if release.link.is_empty() {
            log::warn!("Result '{}' has no download link!", title);
        }

        doc.open("item", &[])?;
        doc.text_element("title", &title)?;
        doc.text_element("guid", &guid)?;
        doc.text_element("link", &release.link)?;
        doc.empty(
            "enclosure",
            &[
                ("url", release.link.as_str()),
                ("length", size.as_str()),
                ("type", "application/x-bittorrent"),
            ],
        )?;
        doc.text_element("comments", &release.details_link)?;
        doc.text_element("pubDate", &format_rfc822_date(&release.pub_date, now))?;
        doc.text_element("size", &size)?;
        doc.text_element("description", &format!("Tracker: {}", indexer))?;
        doc.text_element("category", category_id)?;

        let seeders = release.seeders.to_string();
        let peers = release.peers.to_string();
        let grabs = release.grabs.to_string();
        let attributes = [
            ("size", size.as_str()),
            ("category", category_id),
            ("seeders", seeders.as_str()),
            ("peers", peers.as_str()),
            ("grabs", grabs.as_str()),
            ("downloadvolumefactor", download_factor),
            ("uploadvolumefactor", "1"),
            ("indexer", indexer),
        ];
        for (name, value) in attributes {
            doc.empty("torznab:attr", &[("name", name), ("value", value)])?;
        }
        doc.close("item")?;

        if index == 0 {
            log::info!(
                "First result: title='{}', category={}, size={}, link={}",
                title.chars().take(50).collect::<String>(),
                category_id,
                size,
                if release.link.is_empty() {
                    "MISSING"
                } else {
                    "present"
                }
            );
        }
        Ok(())
    }
}

/// RFC 822 date in UTC for an aggregator date string
///
/// Accepts ISO-8601 (with or without offset) and `dd-mm-YYYY HH:MM`;
/// anything else, including an empty string, yields `now`.
pub fn format_rfc822_date(raw: &str, now: DateTime<Utc>) -> String {
    parse_upstream_date(raw.trim())
        .unwrap_or(now)
        .format(RFC822_FORMAT)
        .to_string()
}

fn parse_upstream_date(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if raw.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        return NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc());
    }

    if raw.contains('-') && raw.contains(' ') {
        return NaiveDateTime::parse_from_str(raw, "%d-%m-%Y %H:%M")
            .ok()
            .map(|naive| naive.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cross_seed::GroupMetadata;
    use crate::modules::indexer::Release;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn item(title: &str, indexer: &str, link: &str) -> FeedItem {
        let mut release = Release::new(title, 1_073_741_824, indexer)
            .with_link(link)
            .with_category("Movies HD");
        release.search_result_id = Some("abc".to_string());
        release.pub_date = "2024-01-15T10:30:00Z".to_string();
        release.seeders = 12;
        release.peers = 3;
        FeedItem {
            release,
            label: "[PRI:1 PUB:1] ".to_string(),
            tracker_counts: GroupMetadata {
                private_count: 1,
                public_count: 1,
            },
        }
    }

    #[test]
    fn test_rfc822_dates() {
        assert_eq!(
            format_rfc822_date("2024-01-15T10:30:00Z", now()),
            "Mon, 15 Jan 2024 10:30:00 +0000"
        );
        assert_eq!(
            format_rfc822_date("2024-01-15T12:30:00+02:00", now()),
            "Mon, 15 Jan 2024 10:30:00 +0000"
        );
        assert_eq!(
            format_rfc822_date("2024-01-15T10:30:00", now()),
            "Mon, 15 Jan 2024 10:30:00 +0000"
        );
        assert_eq!(
            format_rfc822_date("15-01-2024 10:30", now()),
            "Mon, 15 Jan 2024 10:30:00 +0000"
        );
        assert_eq!(format_rfc822_date("", now()), "Sat, 01 Mar 2025 12:00:00 +0000");
        assert_eq!(
            format_rfc822_date("yesterday", now()),
            "Sat, 01 Mar 2025 12:00:00 +0000"
        );
    }

    #[test]
    fn test_renders_channel_and_item() {
        let xml = FeedWriter::new("http://localhost/", true)
            .render_at(&[item("Movie.2020", "Priv1", "http://dl/1")], now())
            .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns:torznab=\"http://torznab.com/schemas/2015/feed\""));
        assert!(xml.contains("<title>Seedable - Cross-Seed Filter</title>"));
        assert!(xml.contains("<title>[PRI:1 PUB:1] Movie.2020</title>"));
        assert!(xml.contains("<guid>abc</guid>"));
        assert!(xml.contains("type=\"application/x-bittorrent\""));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 10:30:00 +0000</pubDate>"));
        assert!(xml.contains("<description>Tracker: Priv1</description>"));
        assert!(xml.contains("<category>2040</category>"));
        assert!(xml.contains("<torznab:attr name=\"seeders\" value=\"12\"/>"));
        assert!(xml.contains("<torznab:attr name=\"downloadvolumefactor\" value=\"1\"/>"));
        assert!(xml.contains("<torznab:attr name=\"indexer\" value=\"Priv1\"/>"));
    }

    #[test]
    fn test_unlabelled_titles_and_escaping() {
        let xml = FeedWriter::new("http://localhost/", false)
            .render_at(&[item("Tom & Jerry <1080p>", "Pub1", "http://dl/1?a=1&b=2")], now())
            .unwrap();

        assert!(xml.contains("<title>Tom &amp; Jerry &lt;1080p&gt;</title>"));
        assert!(xml.contains("url=\"http://dl/1?a=1&amp;b=2\""));
        assert!(!xml.contains("[PRI:"));
    }

    #[test]
    fn test_freeleech_and_fallback_guid() {
        let mut feed_item = item("Movie.2020", "", "");
        feed_item.release.search_result_id = None;
        feed_item.release.download_volume_factor = Some("Freelech".to_string());

        let xml = FeedWriter::new("", false)
            .render_at(&[feed_item], now())
            .unwrap();

        assert!(xml.contains("<guid>0</guid>"));
        assert!(xml.contains("<torznab:attr name=\"downloadvolumefactor\" value=\"0\"/>"));
        assert!(xml.contains("<description>Tracker: Unknown</description>"));
    }

    #[test]
    fn test_empty_feed() {
        let xml = FeedWriter::new("", true).render_at(&[], now()).unwrap();
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }
}
