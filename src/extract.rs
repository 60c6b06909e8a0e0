//! Paper extraction from a fetched listing page.
//!
//! Drives a [`SourceAdapter`] over the page in document order. Two rules
//! decide what is emitted:
//!
//! - a node whose title equals the title of the paper emitted just before it
//!   is a duplicate render of that paper and is dropped; equal titles further
//!   apart are kept as separate papers
//! - a node without a paper URL, or whose structure does not fit the adapter,
//!   is skipped and extraction continues with the next node

use crate::classify::Classifier;
use crate::error::MedaiError;
use crate::source::SourceAdapter;
use crate::venues::Query;
use scraper::Html;
use tracing::debug;

/// A paper listed on a venue page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    pub title: String,
    /// Empty when the source carries no author data
    pub authors: Vec<String>,
    /// Empty when the source carries no abstract
    pub abstract_text: String,
    pub venue: String,
    pub year: String,
    pub url: String,
    pub is_relevant: bool,
}

/// Why a located node produced no paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Link is not paper-specific (e.g. a proceedings header)
    NotAPaper,
    /// Expected structure missing at the named hop
    Mismatch { hop: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    pub title: String,
    pub reason: SkipReason,
}

/// Output of one extraction pass
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Papers in page order
    pub papers: Vec<Paper>,
    pub skipped: Vec<SkippedNode>,
}

impl Extraction {
    pub fn relevant(&self) -> impl Iterator<Item = &Paper> {
        self.papers.iter().filter(|p| p.is_relevant)
    }
}

/// Extractor bound to one adapter and classifier
pub struct Extractor<'a> {
    adapter: &'a SourceAdapter,
    classifier: &'a Classifier,
}

impl<'a> Extractor<'a> {
    pub fn new(adapter: &'a SourceAdapter, classifier: &'a Classifier) -> Self {
        Self {
            adapter,
            classifier,
        }
    }

    /// Extract every paper from `markup`, tagging relevance as each is built.
    pub fn extract(&self, markup: &str, query: &Query) -> Extraction {
        let document = Html::parse_document(markup);
        let mut out = Extraction::default();

        for node in self.adapter.locate(&document) {
            let title = self.adapter.title_of(node);

            if out.papers.last().is_some_and(|prev| prev.title == title) {
                continue;
            }

            let url = match self.adapter.url_of(node) {
                Ok(Some(url)) => url,
                Ok(None) => {
                    debug!(venue = %query.venue_id, year = %query.year, title = %title, "Skipping non-paper node");
                    out.skipped.push(SkippedNode {
                        title,
                        reason: SkipReason::NotAPaper,
                    });
                    continue;
                }
                Err(MedaiError::AdapterMismatch { hop, .. }) => {
                    debug!(venue = %query.venue_id, year = %query.year, title = %title, hop, "Skipping node with unexpected structure");
                    out.skipped.push(SkippedNode {
                        title,
                        reason: SkipReason::Mismatch { hop },
                    });
                    continue;
                }
                Err(e) => {
                    debug!(venue = %query.venue_id, year = %query.year, title = %title, error = %e, "Skipping node");
                    out.skipped.push(SkippedNode {
                        title,
                        reason: SkipReason::Mismatch { hop: "url" },
                    });
                    continue;
                }
            };

            let is_relevant = self.classifier.is_relevant(&title);
            out.papers.push(Paper {
                authors: self.adapter.authors_of(node).unwrap_or_default(),
                abstract_text: self.adapter.abstract_of(node).unwrap_or_default(),
                venue: query.venue_id.clone(),
                year: query.year.clone(),
                url,
                is_relevant,
                title,
            });
        }

        out
    }
}
