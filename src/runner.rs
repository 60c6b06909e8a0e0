//! Fan-out query runner.
//!
//! Expands venues × years into queries, runs every resolvable query as its own
//! tokio task and waits for all of them before returning. Outcomes come back in
//! request order (venue-major) whatever order the tasks finish in. A failing
//! query never affects its siblings.

use crate::classify::Classifier;
use crate::error::MedaiError;
use crate::extract::{Extractor, Paper};
use crate::fetch::Fetch;
use crate::source::SourceAdapters;
use crate::venues::{query_label, Query, VenueRegistry};
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Result of one (venue, year) query
#[derive(Debug)]
pub struct QueryOutcome {
    /// Lower-cased venue id
    pub venue_id: String,
    pub year: String,
    /// Listing URL, if the venue resolved
    pub url: Option<String>,
    /// Every extracted paper in page order
    pub papers: Vec<Paper>,
    pub error: Option<MedaiError>,
}

impl QueryOutcome {
    fn failed(venue_id: String, year: String, url: Option<String>, error: MedaiError) -> Self {
        Self {
            venue_id,
            year,
            url,
            papers: Vec::new(),
            error: Some(error),
        }
    }

    /// Heading used in reports, e.g. `ACL 2019`
    pub fn label(&self) -> String {
        query_label(&self.venue_id, &self.year)
    }

    pub fn total(&self) -> usize {
        self.papers.len()
    }

    pub fn relevant(&self) -> impl Iterator<Item = &Paper> {
        self.papers.iter().filter(|p| p.is_relevant)
    }

    pub fn relevant_count(&self) -> usize {
        self.relevant().count()
    }

    /// Papers to report: all of them, or only the relevant subset
    pub fn reported(&self, include_all: bool) -> Vec<&Paper> {
        if include_all {
            self.papers.iter().collect()
        } else {
            self.relevant().collect()
        }
    }

    /// False when the venue was unknown and nothing was fetched
    pub fn was_executed(&self) -> bool {
        !matches!(self.error, Some(MedaiError::UnknownVenue { .. }))
    }
}

/// All outcomes of one run, in request order
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<QueryOutcome>,
    pub include_all: bool,
}

impl BatchReport {
    pub fn get(&self, venue_id: &str, year: &str) -> Option<&QueryOutcome> {
        let venue = venue_id.to_lowercase();
        self.outcomes
            .iter()
            .find(|o| o.venue_id == venue && o.year == year)
    }

    /// Every extracted paper across successful queries
    pub fn all_papers(&self) -> impl Iterator<Item = &Paper> {
        self.outcomes.iter().flat_map(|o| o.papers.iter())
    }

    /// Venue ids that failed resolution, first occurrence order
    pub fn unknown_venues(&self) -> Vec<&str> {
        let mut venues: Vec<&str> = Vec::new();
        for outcome in &self.outcomes {
            if let Some(MedaiError::UnknownVenue { venue }) = &outcome.error {
                if !venues.contains(&venue.as_str()) {
                    venues.push(venue);
                }
            }
        }
        venues
    }
}

enum Slot {
    Done(QueryOutcome),
    Running {
        venue_id: String,
        year: String,
        url: String,
        handle: JoinHandle<QueryOutcome>,
    },
}

/// Runs batches of venue/year queries against shared read-only configuration
pub struct QueryRunner {
    registry: Arc<VenueRegistry>,
    adapters: Arc<SourceAdapters>,
    classifier: Arc<Classifier>,
    fetcher: Arc<dyn Fetch>,
}

impl QueryRunner {
    pub fn new(
        registry: Arc<VenueRegistry>,
        adapters: Arc<SourceAdapters>,
        classifier: Arc<Classifier>,
        fetcher: Arc<dyn Fetch>,
    ) -> Self {
        Self {
            registry,
            adapters,
            classifier,
            fetcher,
        }
    }

    /// Run every (venue, year) pair and wait for all of them.
    ///
    /// Repeated pairs are queried once. Unknown venues are reported without
    /// a fetch.
    pub async fn run<V, Y>(&self, venues: &[V], years: &[Y], include_all: bool) -> BatchReport
    where
        V: AsRef<str>,
        Y: AsRef<str>,
    {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for venue in venues {
            for year in years {
                let pair = (venue.as_ref().to_lowercase(), year.as_ref().to_string());
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }

        info!(queries = pairs.len(), include_all, "Starting batch");

        let slots: Vec<Slot> = pairs
            .into_iter()
            .map(|(venue_id, year)| match self.registry.resolve(&venue_id, &year) {
                Ok(query) => Slot::Running {
                    venue_id,
                    year,
                    url: query.url.clone(),
                    handle: tokio::spawn(execute(
                        query,
                        Arc::clone(&self.fetcher),
                        Arc::clone(&self.adapters),
                        Arc::clone(&self.classifier),
                    )),
                },
                Err(e) => {
                    warn!(venue = %venue_id, year = %year, error = %e, "Query not executed");
                    Slot::Done(QueryOutcome::failed(venue_id, year, None, e))
                }
            })
            .collect();

        let outcomes = join_all(slots.into_iter().map(|slot| async move {
            match slot {
                Slot::Done(outcome) => outcome,
                Slot::Running {
                    venue_id,
                    year,
                    url,
                    handle,
                } => match handle.await {
                    Ok(outcome) => outcome,
                    Err(e) => QueryOutcome::failed(
                        venue_id,
                        year,
                        Some(url),
                        MedaiError::Task(e.to_string()),
                    ),
                },
            }
        }))
        .await;

        info!(queries = outcomes.len(), "Batch complete");

        BatchReport {
            outcomes,
            include_all,
        }
    }
}

/// One unit of work: fetch, extract, classify
async fn execute(
    query: Query,
    fetcher: Arc<dyn Fetch>,
    adapters: Arc<SourceAdapters>,
    classifier: Arc<Classifier>,
) -> QueryOutcome {
    info!(venue = %query.venue_id, year = %query.year, source = %query.source, url = %query.url, "Connecting");

    let markup = match fetcher.fetch(&query.url).await {
        Ok(markup) => markup,
        Err(e) => {
            warn!(venue = %query.venue_id, year = %query.year, error = %e, "Fetch failed");
            return QueryOutcome::failed(query.venue_id, query.year, Some(query.url), e.into());
        }
    };

    let extraction = Extractor::new(adapters.get(query.source), &classifier).extract(&markup, &query);

    info!(
        venue = %query.venue_id,
        year = %query.year,
        total = extraction.papers.len(),
        relevant = extraction.relevant().count(),
        skipped = extraction.skipped.len(),
        "Query complete"
    );

    QueryOutcome {
        venue_id: query.venue_id,
        year: query.year,
        url: Some(query.url),
        papers: extraction.papers,
        error: None,
    }
}
