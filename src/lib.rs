//! # rustmedai
//!
//! Medical-like AI paper picker for conference listings - Rust CLI
//!
//! ## Modules
//!
//! - [`venues`] - Venue registry and listing URL templates
//! - [`source`] - Per page-family extraction rules (ACL Anthology, dblp)
//! - [`extract`] - Paper extraction with adjacent-duplicate collapse
//! - [`classify`] - Keyword relevance classifier
//! - [`fetch`] - Listing page retrieval
//! - [`runner`] - Parallel venue × year query runner
//! - [`render`] - Plain, Markdown, HTML and CSV renderings
//! - [`report`] - Console report assembly
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustmedai::{classify::Classifier, fetch::{FetchConfig, HttpFetcher},
//!     runner::QueryRunner, source::SourceAdapters, venues::VenueRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = QueryRunner::new(
//!         Arc::new(VenueRegistry::builtin()),
//!         Arc::new(SourceAdapters::new()?),
//!         Arc::new(Classifier::medical()),
//!         Arc::new(HttpFetcher::new(&FetchConfig::default())?),
//!     );
//!     let batch = runner.run(&["acl"], &["2019"], false).await;
//!     for outcome in &batch.outcomes {
//!         println!("{}: {} / {}", outcome.label(), outcome.relevant_count(), outcome.total());
//!     }
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod render;
pub mod report;
pub mod runner;
pub mod source;
pub mod venues;

pub use error::{MedaiError, Result};
