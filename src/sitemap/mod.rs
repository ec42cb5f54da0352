//! Sitemap documents and the `<lastmod>` rewrite.
//!
//! Two document kinds are recognized by their root element:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! ```xml
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <sitemap>
//!     <loc>https://example.com/sitemap-posts.xml</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </sitemap>
//! </sitemapindex>
//! ```
//!
//! Only a `lastmod` that is a direct child of an entry (`url` or `sitemap`)
//! is rewritten. Everything else is streamed through unchanged.

mod rewrite;

pub use rewrite::{Rewrite, rewrite_lastmod};

use std::fmt;
use thiserror::Error;

/// Kind of sitemap document, decided by the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<urlset>` with `<url>` entries.
    UrlSet,
    /// `<sitemapindex>` with `<sitemap>` entries.
    SitemapIndex,
}

impl SitemapKind {
    /// Detect the kind from the local name of the root element.
    pub fn from_root(local_name: &[u8]) -> Option<Self> {
        match local_name {
            b"urlset" => Some(Self::UrlSet),
            b"sitemapindex" => Some(Self::SitemapIndex),
            _ => None,
        }
    }

    pub const fn root_tag(self) -> &'static str {
        match self {
            Self::UrlSet => "urlset",
            Self::SitemapIndex => "sitemapindex",
        }
    }

    /// Local name of the entry element whose `lastmod` children are rewritten.
    pub const fn entry_tag(self) -> &'static str {
        match self {
            Self::UrlSet => "url",
            Self::SitemapIndex => "sitemap",
        }
    }
}

impl fmt::Display for SitemapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_tag())
    }
}

/// Errors raised while parsing or re-serializing a sitemap.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML syntax error at byte {position}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("unexpected root element `{0}`, expected `urlset` or `sitemapindex`")]
    UnexpectedRoot(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("element `{0}` follows the root element")]
    ExtraRoot(String),

    #[error("text outside the root element at byte {0}")]
    TextOutsideRoot(u64),

    #[error("element `{0}` is never closed")]
    Unclosed(String),

    #[error("failed to serialize XML")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_root() {
        assert_eq!(SitemapKind::from_root(b"urlset"), Some(SitemapKind::UrlSet));
        assert_eq!(
            SitemapKind::from_root(b"sitemapindex"),
            Some(SitemapKind::SitemapIndex)
        );
        assert_eq!(SitemapKind::from_root(b"rss"), None);
        assert_eq!(SitemapKind::from_root(b"URLSET"), None);
    }

    #[test]
    fn test_kind_entry_tag() {
        assert_eq!(SitemapKind::UrlSet.entry_tag(), "url");
        assert_eq!(SitemapKind::SitemapIndex.entry_tag(), "sitemap");
        assert_eq!(SitemapKind::SitemapIndex.to_string(), "sitemapindex");
    }

    #[test]
    fn test_xml_error_display() {
        let err = XmlError::UnexpectedRoot("rss".to_string());
        let display = err.to_string();
        assert!(display.contains("`rss`"));
        assert!(display.contains("urlset"));

        assert_eq!(
            XmlError::Unclosed("url".to_string()).to_string(),
            "element `url` is never closed"
        );
    }
}
