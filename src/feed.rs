//! Weather feed document
//!
//! The feed is an RSS document whose interesting parts are namespace-qualified
//! elements (`yweather:forecast`, `yweather:astronomy`, `geo:lat`, `geo:long`).
//! [`FeedDocument::parse`] reads the whole document up front into a flat,
//! document-ordered list of elements, so a malformed feed is rejected before
//! any record is built from it.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::debug;

use crate::{FeedError, Result};

/// Qualified element names the feed uses
pub mod tags {
    pub const FORECAST: &str = "yweather:forecast";
    pub const ASTRONOMY: &str = "yweather:astronomy";
    pub const GEO_LAT: &str = "geo:lat";
    pub const GEO_LONG: &str = "geo:long";
}

/// One element of the feed with its attributes and direct text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl FeedElement {
    /// Qualified name, prefix included (`yweather:forecast`)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text directly inside this element, unmodified
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Look up an attribute value; `None` when absent
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up a required attribute
    pub fn required_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| FeedError::missing_attribute(&self.name, name))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| FeedError::parse(format!("bad attribute in <{name}>: {e}")))?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = unescape(utf8(&attr.value)?)?;
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            text: String::new(),
        })
    }
}

/// A parsed feed: every element in document order
#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    elements: Vec<FeedElement>,
}

impl FeedDocument {
    /// Parse a complete feed document.
    ///
    /// Fails with [`FeedError::Parse`] on anything that is not a single
    /// well-formed root element: syntax errors, mismatched or unclosed tags,
    /// stray text outside the root, or an empty input.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();

        let mut elements: Vec<FeedElement> = Vec::new();
        // indices into `elements` of the currently open elements
        let mut open: Vec<usize> = Vec::new();
        let mut seen_root = false;

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|e| {
                FeedError::parse(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                ))
            })?;

            match event {
                Event::Start(start) => {
                    Self::check_single_root(&open, &mut seen_root)?;
                    elements.push(FeedElement::from_start(&start)?);
                    open.push(elements.len() - 1);
                }
                Event::Empty(start) => {
                    Self::check_single_root(&open, &mut seen_root)?;
                    elements.push(FeedElement::from_start(&start)?);
                }
                Event::End(_) => {
                    // end names are checked by the reader itself
                    open.pop();
                }
                Event::Text(text) => {
                    let raw = utf8(&text)?;
                    match open.last() {
                        Some(&index) => elements[index].text.push_str(&unescape(raw)?),
                        None if raw.trim().is_empty() => {}
                        None => {
                            return Err(FeedError::parse("text outside the root element"));
                        }
                    }
                }
                Event::GeneralRef(reference) => {
                    let resolved = resolve_reference(&reference)?;
                    match open.last() {
                        Some(&index) => elements[index].text.push_str(&resolved),
                        None => {
                            return Err(FeedError::parse("text outside the root element"));
                        }
                    }
                }
                Event::CData(data) => {
                    if let Some(&index) = open.last() {
                        elements[index].text.push_str(utf8(&data)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(&index) = open.last() {
            return Err(FeedError::parse(format!(
                "unexpected end of document inside <{}>",
                elements[index].name
            )));
        }
        if !seen_root {
            return Err(FeedError::parse("document has no root element"));
        }

        debug!("Parsed feed document with {} elements", elements.len());
        Ok(Self { elements })
    }

    fn check_single_root(open: &[usize], seen_root: &mut bool) -> Result<()> {
        if open.is_empty() {
            if *seen_root {
                return Err(FeedError::parse("more than one root element"));
            }
            *seen_root = true;
        }
        Ok(())
    }

    /// All elements with the given qualified name, in document order
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FeedElement> + 'a {
        self.elements.iter().filter(move |element| element.name == name)
    }

    /// The first element with the given qualified name
    #[must_use]
    pub fn first_named(&self, name: &str) -> Option<&FeedElement> {
        self.elements.iter().find(|element| element.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| FeedError::parse(format!("invalid UTF-8: {e}")))
}

/// Character references and the predefined entities; anything else is undefined
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    let name = utf8(reference)?;
    let char_ref = reference
        .resolve_char_ref()
        .map_err(|e| FeedError::parse(format!("bad character reference '&{name};': {e}")))?;
    if let Some(ch) = char_ref {
        return Ok(ch.to_string());
    }
    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| FeedError::parse(format!("undefined entity '&{name};'")))
}

fn unescape(raw: &str) -> Result<String> {
    quick_xml::escape::unescape(raw)
        .map(|value| value.into_owned())
        .map_err(|e| FeedError::parse(format!("bad entity in '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>
<rss version="2.0" xmlns:yweather="http://xml.weather.yahoo.com/ns/rss/1.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>Yahoo! Weather - Oxford, GB</title>
    <yweather:astronomy sunrise="7:43 am" sunset="4:12 pm"/>
    <item>
      <geo:lat>51.75</geo:lat>
      <geo:long>-1.25</geo:long>
      <yweather:forecast day="Mon" date="3 Dec 2012" low="2" high="7" text="Showers &amp; Wind" code="11" />
      <description><![CDATA[<img src="http://l.yimg.com/a/i/us/we/52/11.gif"/>]]></description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_elements() {
        let document = FeedDocument::parse(FEED.as_bytes()).unwrap();

        let forecast = document.first_named(tags::FORECAST).unwrap();
        assert_eq!(forecast.attribute("day"), Some("Mon"));
        assert_eq!(forecast.attribute("text"), Some("Showers & Wind"));
        assert_eq!(forecast.attribute("missing"), None);

        assert_eq!(document.first_named(tags::GEO_LAT).unwrap().text(), "51.75");
        assert_eq!(document.first_named(tags::GEO_LONG).unwrap().text(), "-1.25");
        assert_eq!(document.elements_named(tags::ASTRONOMY).count(), 1);
        assert!(
            document
                .first_named("description")
                .unwrap()
                .text()
                .contains("11.gif")
        );
    }

    #[test]
    fn test_elements_in_document_order() {
        let xml = r#"<root><a n="1"/><b/><a n="2"><a n="3"/></a></root>"#;
        let document = FeedDocument::parse(xml.as_bytes()).unwrap();

        let order: Vec<&str> = document
            .elements_named("a")
            .filter_map(|element| element.attribute("n"))
            .collect();
        assert_eq!(order, vec!["1", "2", "3"]);
        assert_eq!(document.len(), 5);
    }

    #[test]
    fn test_required_attribute_missing() {
        let document = FeedDocument::parse(br#"<yweather:forecast day="Tue"/>"#).unwrap();
        let element = document.first_named(tags::FORECAST).unwrap();

        let err = element.required_attribute("code").unwrap_err();
        assert!(matches!(
            err,
            FeedError::MissingAttribute { ref element, ref attribute }
                if element == "yweather:forecast" && attribute == "code"
        ));
    }

    #[rstest]
    #[case::decimal_char_ref("<rss><geo:lat>51&#46;75</geo:lat></rss>", "51.75")]
    #[case::hex_char_ref("<rss><geo:lat>51&#x2E;75</geo:lat></rss>", "51.75")]
    #[case::predefined_entity("<rss><geo:lat>-1&amp;25</geo:lat></rss>", "-1&25")]
    #[case::only_reference("<rss><geo:lat>&lt;</geo:lat></rss>", "<")]
    fn test_references_in_text_resolved(#[case] xml: &str, #[case] expected: &str) {
        let document = FeedDocument::parse(xml.as_bytes()).unwrap();
        assert_eq!(document.first_named(tags::GEO_LAT).unwrap().text(), expected);
    }

    #[rstest]
    #[case::mismatched_end("<rss><channel></rss>")]
    #[case::unclosed_root("<rss><channel></channel>")]
    #[case::truncated_tag(r#"<rss><yweather:forecast day="Mon""#)]
    #[case::not_xml("this is not a weather feed")]
    #[case::empty("")]
    #[case::two_roots("<a/><b/>")]
    #[case::undefined_entity("<rss><geo:lat>&bogus;</geo:lat></rss>")]
    #[case::reference_outside_root("&amp;<rss/>")]
    fn test_malformed_documents_rejected(#[case] xml: &str) {
        let result = FeedDocument::parse(xml.as_bytes());
        assert!(
            matches!(result, Err(FeedError::Parse { .. })),
            "expected parse error for {xml:?}, got {result:?}"
        );
    }
}
