use feed_rs::parser;
use html_escape::decode_html_entities;
use thiserror::Error;

/// Feed-level metadata parsed from the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub title: String,
    pub description: String,
}

/// One item as it comes out of the feed, before an id is minted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChannel {
    pub feed: ParsedFeed,
    pub posts: Vec<ParsedPost>,
}

#[derive(Debug, Error)]
#[error("not a valid feed: {0}")]
pub struct ParseError(String);

/// Parses raw feed text (RSS or Atom) into the channel shape the core
/// consumes. HTML entities in titles and descriptions are decoded here so
/// nothing downstream has to care.
#[derive(Debug, Clone, Default)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedChannel, ParseError> {
        let feed = parser::parse(raw.as_bytes()).map_err(|e| ParseError(e.to_string()))?;

        let meta = ParsedFeed {
            title: feed
                .title
                .map(|t| decode_html_entities(&t.content).to_string())
                .unwrap_or_default(),
            description: feed
                .description
                .map(|d| decode_html_entities(&d.content).to_string())
                .unwrap_or_default(),
        };

        let posts = feed
            .entries
            .into_iter()
            .map(|entry| ParsedPost {
                title: entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default(),
                description: entry
                    .summary
                    .map(|s| decode_html_entities(&s.content).to_string())
                    .unwrap_or_default(),
                link: entry
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(ParsedChannel { feed: meta, posts })
    }
}
