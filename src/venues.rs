//! Venue registry.
//!
//! Maps a conference id to the page family its listings are published under and
//! fills that family's URL template. The table is built once and never mutated.

use crate::error::{MedaiError, Result};
use std::fmt;
use url::Url;

/// Separator framing the usage hint and the console report
pub const SEPARATOR: &str = "===================================";

/// Listing page families with a known structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// Source "A": ACL Anthology event pages
    AclAnthology,
    /// Source "B": dblp proceedings tables of contents
    Dblp,
}

impl SourceId {
    /// URL template for this family, `{0}` = venue id, `{1}` = year
    pub fn url_template(self) -> &'static str {
        match self {
            SourceId::AclAnthology => "https://aclweb.org/anthology/events/{0}-{1}",
            SourceId::Dblp => "https://dblp.org/db/conf/{0}/{0}{1}.html",
        }
    }

    fn fill(self, venue: &str, year: &str) -> String {
        self.url_template()
            .replace("{0}", venue)
            .replace("{1}", year)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::AclAnthology => f.write_str("aclweb"),
            SourceId::Dblp => f.write_str("dblp"),
        }
    }
}

/// Grouping used only for the usage hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Natural language processing venues, listed on the ACL Anthology
    Nlp,
    /// Machine learning and general AI venues, listed on dblp
    Ml,
    /// Computer vision venues, listed on dblp
    Cv,
}

impl Category {
    /// Order in which groups appear in the usage hint
    const HINT_ORDER: [Category; 3] = [Category::Ml, Category::Cv, Category::Nlp];

    /// Group heading used in the usage hint
    pub fn label(self) -> &'static str {
        match self {
            Category::Nlp => "NLP",
            Category::Ml => "ML, AI",
            Category::Cv => "CV",
        }
    }
}

/// One row of the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueEntry {
    pub venue_id: &'static str,
    pub category: Category,
    pub source: SourceId,
}

/// A resolved (venue, year) request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub venue_id: String,
    pub year: String,
    pub source: SourceId,
    pub url: String,
}

impl Query {
    /// Heading used in reports, e.g. `ACL 2019`
    pub fn label(&self) -> String {
        query_label(&self.venue_id, &self.year)
    }
}

/// Upper-cased venue followed by the year
pub fn query_label(venue_id: &str, year: &str) -> String {
    format!("{} {}", venue_id.to_uppercase(), year)
}

const NLP_VENUES: &[&str] = &[
    "acl",
    "anlp",
    "cl",
    "conll",
    "eacl",
    "emnlp",
    "naacl",
    "semeval",
    "tacl",
    "ws",
    "alta",
    "coling",
    "hlt",
    "ijcnlp",
    "jep-taln-recital",
    "lrec",
    "muc",
    "paclic",
    "ranlp",
    "rocling-ijclclp",
    "tinlap",
    "tipster",
];

const ML_VENUES: &[&str] = &["nips", "icml", "iclr", "ijcnn", "ijcai"];

const CV_VENUES: &[&str] = &["cvpr", "iccv"];

/// Immutable venue table
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    entries: Vec<VenueEntry>,
}

impl VenueRegistry {
    /// Build a registry from explicit entries
    pub fn new(entries: Vec<VenueEntry>) -> Self {
        Self { entries }
    }

    /// The built-in table of supported conferences
    pub fn builtin() -> Self {
        let groups = [
            (Category::Nlp, SourceId::AclAnthology, NLP_VENUES),
            (Category::Ml, SourceId::Dblp, ML_VENUES),
            (Category::Cv, SourceId::Dblp, CV_VENUES),
        ];

        let entries = groups
            .iter()
            .flat_map(|(category, source, ids)| {
                ids.iter().map(move |id| VenueEntry {
                    venue_id: *id,
                    category: *category,
                    source: *source,
                })
            })
            .collect();

        Self::new(entries)
    }

    /// Look up a venue id, case-insensitively
    pub fn lookup(&self, venue_id: &str) -> Option<&VenueEntry> {
        let wanted = venue_id.to_lowercase();
        self.entries.iter().find(|e| e.venue_id == wanted)
    }

    /// Resolve a (venue, year) pair to a concrete listing URL.
    ///
    /// # Errors
    ///
    /// `UnknownVenue` if the id is not registered, `Config` if the filled
    /// template is not a valid URL.
    pub fn resolve(&self, venue_id: &str, year: &str) -> Result<Query> {
        let venue = venue_id.to_lowercase();
        let entry = self
            .lookup(&venue)
            .ok_or_else(|| MedaiError::UnknownVenue {
                venue: venue.clone(),
            })?;

        let url = entry.source.fill(&venue, year);
        Url::parse(&url)
            .map_err(|e| MedaiError::Config(format!("Invalid listing URL '{}': {}", url, e)))?;

        Ok(Query {
            venue_id: venue,
            year: year.to_string(),
            source: entry.source,
            url,
        })
    }

    /// Venue ids of one category, in table order
    pub fn venues_in(&self, category: Category) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.venue_id)
            .collect()
    }

    /// Grouped list of valid ids shown after an unknown venue
    pub fn usage_hint(&self, unknown: &str) -> String {
        let mut lines = vec![
            format!("Error: unavailable conference '{}'.", unknown),
            SEPARATOR.to_string(),
            "Available conferences:".to_string(),
        ];
        for category in Category::HINT_ORDER {
            lines.push(format!("\t{}:", category.label()));
            lines.push(format!("\t\t{}", self.venues_in(category).join(", ")));
        }
        lines.push(SEPARATOR.to_string());
        lines.join("\n")
    }
}

impl Default for VenueRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
