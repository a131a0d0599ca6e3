//! RSS feed generation.
//!
//! Projects validated records into an RSS 2.0 document. This is a pure
//! projection: the same records and configuration always produce the same
//! document, and entry order follows the input sequence. Draft filtering, if
//! wanted, is the caller's job.

use std::io::Write;

use folio_core::{Config, Post};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;
use tracing::debug;

/// Collection path segment used in project permalinks.
const PROJECTS_PATH: &str = "projects";

/// Feed generation errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// IO error while writing the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// RSS feed generator over project records.
#[derive(Debug)]
pub struct FeedGenerator {
    config: Config,
}

impl FeedGenerator {
    /// Create a new feed generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate the RSS document from validated records, one entry per
    /// record in input order. An empty input yields a feed with no entries.
    pub fn generate(&self, records: &[Post]) -> Result<String> {
        debug!(count = records.len(), "generating feed");

        let items: Vec<Item> = records
            .iter()
            .map(|record| self.record_to_item(record))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.site.title)
            .link(&self.config.site.base_url)
            .description(
                self.config
                    .site
                    .description
                    .as_deref()
                    .unwrap_or(&self.config.site.title),
            )
            .language(Some(self.config.site.lang.clone()))
            .items(items)
            .build();

        Ok(channel.to_string())
    }

    /// Convert a record into an RSS item with its permalink.
    fn record_to_item(&self, record: &Post) -> Item {
        let url = self
            .config
            .url_for(&format!("{PROJECTS_PATH}/{}/", record.id));

        let guid = GuidBuilder::default().value(&url).permalink(true).build();

        ItemBuilder::default()
            .title(Some(record.title.clone()))
            .link(Some(url))
            .guid(Some(guid))
            .pub_date(Some(record.publish_date.to_rfc2822()))
            .build()
    }

    /// Write the feed to a writer.
    pub fn write_to<W: Write>(&self, records: &[Post], writer: &mut W) -> Result<()> {
        let xml = self.generate(records)?;
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }
}
