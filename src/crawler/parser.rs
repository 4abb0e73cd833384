//! Sitemap XML parser
//!
//! This module turns a fetched body into a [`SitemapDocument`]:
//! - `<sitemapindex>` roots produce an index of child sitemap locations
//! - `<urlset>` roots produce a set of page locations
//!
//! Elements are matched by local name, so documents using the sitemap
//! namespace (with or without a prefix) parse the same way.

use crate::ParseError;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// A sitemap index: locations of child sitemaps, in document order
    Index { children: Vec<String> },

    /// A urlset: page locations, in document order
    UrlSet { urls: Vec<String> },
}

impl SitemapDocument {
    /// Number of locations in the document
    pub fn len(&self) -> usize {
        match self {
            SitemapDocument::Index { children } => children.len(),
            SitemapDocument::UrlSet { urls } => urls.len(),
        }
    }

    /// Whether the document lists no locations
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The two recognized root elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    SitemapIndex,
    UrlSet,
}

impl Root {
    fn from_name(name: &[u8]) -> Result<Self, ParseError> {
        match name {
            b"sitemapindex" => Ok(Root::SitemapIndex),
            b"urlset" => Ok(Root::UrlSet),
            other => Err(ParseError::UnknownRoot(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }

    /// Element that wraps each `<loc>` under this root
    fn entry_name(&self) -> &'static [u8] {
        match self {
            Root::SitemapIndex => b"sitemap",
            Root::UrlSet => b"url",
        }
    }

    fn into_document(self, locations: Vec<String>) -> SitemapDocument {
        match self {
            Root::SitemapIndex => SitemapDocument::Index {
                children: locations,
            },
            Root::UrlSet => SitemapDocument::UrlSet { urls: locations },
        }
    }
}

/// Parses a sitemap or sitemap index document
///
/// # Parsing Rules
///
/// - Only `<loc>` elements directly inside an entry (`<sitemap>` for an
///   index, `<url>` for a urlset) are collected
/// - Location text is unescaped and trimmed; CDATA sections are accepted
/// - Empty locations are skipped
/// - Any other child elements (`<lastmod>`, `<priority>`, image extensions,
///   ...) are ignored
///
/// # Arguments
///
/// * `xml` - The document body
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The document's locations, in document order
/// * `Err(ParseError)` - Malformed XML, no root element, or an unknown root
///
/// # Example
///
/// ```
/// use sitemap_search::crawler::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<urlset><url><loc>https://example.com/a</loc></url></urlset>"#;
/// let doc = parse_sitemap(xml).unwrap();
/// assert_eq!(
///     doc,
///     SitemapDocument::UrlSet { urls: vec!["https://example.com/a".to_string()] }
/// );
/// ```
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Root> = None;
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut locations = Vec::new();
    let mut current_loc: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| ParseError::Xml {
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;

        match event {
            XmlEvent::Start(element) => {
                let name = element.local_name().as_ref().to_vec();

                if open.is_empty() {
                    root = Some(open_root(root, &name, reader.buffer_position() as u64)?);
                }

                if let Some(kind) = root {
                    if open.len() == 2 && open[1] == kind.entry_name() && name == b"loc" {
                        current_loc = Some(String::new());
                    }
                }

                open.push(name);
            }
            XmlEvent::Empty(element) => {
                // `<urlset/>` is a complete (empty) document
                if open.is_empty() {
                    let name = element.local_name().as_ref().to_vec();
                    root = Some(open_root(root, &name, reader.buffer_position() as u64)?);
                }
            }
            XmlEvent::Text(text) => {
                if let Some(loc) = current_loc.as_mut() {
                    let unescaped = text.unescape().map_err(|e| ParseError::Xml {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    loc.push_str(&unescaped);
                }
            }
            XmlEvent::CData(data) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            XmlEvent::End(_) => {
                let closed = open.pop();
                if closed.as_deref() == Some(b"loc".as_slice()) {
                    if let Some(loc) = current_loc.take() {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            locations.push(loc.to_string());
                        }
                    }
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(ParseError::Xml {
            position: reader.buffer_position() as u64,
            message: format!(
                "unexpected end of document, <{}> is not closed",
                String::from_utf8_lossy(unclosed)
            ),
        });
    }

    root.map(|kind| kind.into_document(locations))
        .ok_or(ParseError::Empty)
}

/// Records the root element, rejecting a second top-level element
fn open_root(previous: Option<Root>, name: &[u8], position: u64) -> Result<Root, ParseError> {
    if previous.is_some() {
        return Err(ParseError::Xml {
            position,
            message: format!(
                "unexpected second root element <{}>",
                String::from_utf8_lossy(name)
            ),
        });
    }
    Root::from_name(name)
}
