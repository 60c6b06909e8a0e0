//! Console report for a finished batch.

use crate::error::Result;
use crate::render::{render, RenderMode};
use crate::runner::{BatchReport, QueryOutcome};
use crate::venues::{VenueRegistry, SEPARATOR};

/// Shown for a query with nothing to report, with or without `--all`
pub const NONE_FOUND: &str = "No medical-like AI papers found.";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Summaries and errors only
    pub quiet: bool,
    pub mode: RenderMode,
}

/// `N / M` summary line for one executed query
pub fn summary_line(outcome: &QueryOutcome, include_all: bool) -> String {
    if include_all {
        format!("All papers in {}: {}", outcome.label(), outcome.total())
    } else {
        format!(
            "Medical-like AI papers in {}: {} / {}",
            outcome.label(),
            outcome.relevant_count(),
            outcome.total()
        )
    }
}

fn error_line(outcome: &QueryOutcome) -> Option<String> {
    outcome.error.as_ref().map(|e| format!("Error: {}", e))
}

fn catalogue(outcome: &QueryOutcome, include_all: bool, mode: RenderMode) -> Result<String> {
    if let Some(line) = error_line(outcome) {
        return Ok(line);
    }
    let papers = outcome.reported(include_all);
    if papers.is_empty() {
        return Ok(NONE_FOUND.to_string());
    }
    render(papers, mode)
}

/// Build the full report text.
///
/// Unknown venues come first as usage hints. Unless quiet, each executed
/// query then gets a section with its catalogue. Every executed query ends
/// with a summary line, even when nothing matched or the fetch failed.
pub fn compose(
    batch: &BatchReport,
    registry: &VenueRegistry,
    options: &ReportOptions,
) -> Result<String> {
    let mut blocks: Vec<String> = batch
        .unknown_venues()
        .into_iter()
        .map(|venue| registry.usage_hint(venue))
        .collect();

    let executed: Vec<&QueryOutcome> = batch
        .outcomes
        .iter()
        .filter(|o| o.was_executed())
        .collect();

    if executed.is_empty() {
        return Ok(blocks.join("\n"));
    }

    let mut lines: Vec<String> = Vec::new();
    if !options.quiet {
        lines.push(SEPARATOR.to_string());
        for outcome in &executed {
            lines.push(String::new());
            lines.push(outcome.label());
            lines.push(String::new());
            lines.push(catalogue(outcome, batch.include_all, options.mode)?);
        }
        lines.push(String::new());
        lines.push(SEPARATOR.to_string());
    }

    for outcome in &executed {
        if options.quiet {
            if let Some(line) = error_line(outcome) {
                lines.push(line);
            }
        }
        lines.push(summary_line(outcome, batch.include_all));
    }

    blocks.push(lines.join("\n"));
    Ok(blocks.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MedaiError, TransportError};
    use crate::extract::Paper;

    fn paper(title: &str, relevant: bool) -> Paper {
        Paper {
            title: title.to_string(),
            authors: Vec::new(),
            abstract_text: String::new(),
            venue: "acl".to_string(),
            year: "2019".to_string(),
            url: format!("https://x/{}", title.len()),
            is_relevant: relevant,
        }
    }

    fn outcome(venue: &str, papers: Vec<Paper>, error: Option<MedaiError>) -> QueryOutcome {
        QueryOutcome {
            venue_id: venue.to_string(),
            year: "2019".to_string(),
            url: None,
            papers,
            error,
        }
    }

    fn batch(include_all: bool) -> BatchReport {
        BatchReport {
            outcomes: vec![
                outcome(
                    "acl",
                    vec![paper("Clinical NER", true), paper("Parsing", false)],
                    None,
                ),
                outcome("naacl", vec![paper("Parsing", false)], None),
                outcome(
                    "icml",
                    Vec::new(),
                    Some(MedaiError::Transport(TransportError::Http {
                        status: 404,
                        reason: "Not Found".to_string(),
                    })),
                ),
                outcome(
                    "zzz",
                    Vec::new(),
                    Some(MedaiError::UnknownVenue {
                        venue: "zzz".to_string(),
                    }),
                ),
            ],
            include_all,
        }
    }

    #[test]
    fn test_quiet_summaries() {
        let registry = VenueRegistry::builtin();
        let options = ReportOptions {
            quiet: true,
            mode: RenderMode::Plain,
        };
        let text = compose(&batch(false), &registry, &options).expect("compose");

        assert!(text.starts_with("Error: unavailable conference 'zzz'."));
        assert!(text.contains("Medical-like AI papers in ACL 2019: 1 / 2"));
        assert!(text.contains("Medical-like AI papers in NAACL 2019: 0 / 1"));
        assert!(text.contains("Error: 404 Not Found\nMedical-like AI papers in ICML 2019: 0 / 0"));
        assert!(!text.contains("Clinical NER"));
        assert!(!text.contains("ZZZ 2019"));
    }

    #[test]
    fn test_full_report_sections() {
        let registry = VenueRegistry::builtin();
        let options = ReportOptions {
            quiet: false,
            mode: RenderMode::TitleOnly,
        };
        let text = compose(&batch(false), &registry, &options).expect("compose");

        assert!(text.contains("\nACL 2019\n\nClinical NER\n"));
        assert!(text.contains(&format!("\nNAACL 2019\n\n{}\n", NONE_FOUND)));
        assert!(text.contains("\nICML 2019\n\nError: 404 Not Found\n"));
        assert!(!text.contains("\nParsing\n"));
    }

    #[test]
    fn test_include_all() {
        let registry = VenueRegistry::builtin();
        let options = ReportOptions {
            quiet: false,
            mode: RenderMode::TitleOnly,
        };
        let text = compose(&batch(true), &registry, &options).expect("compose");

        assert!(text.contains("\nACL 2019\n\nClinical NER\n\nParsing\n"));
        assert!(text.contains("All papers in ACL 2019: 2"));
        assert!(text.contains("All papers in ICML 2019: 0"));
    }

    #[test]
    fn test_include_all_empty_catalogue() {
        let registry = VenueRegistry::builtin();
        let empty = BatchReport {
            outcomes: vec![outcome("acl", Vec::new(), None)],
            include_all: true,
        };
        let text = compose(&empty, &registry, &ReportOptions::default()).expect("compose");
        assert!(text.contains(&format!("\nACL 2019\n\n{}\n", NONE_FOUND)));
        assert!(text.contains("All papers in ACL 2019: 0"));
    }

    #[test]
    fn test_markdown_catalogue_separated_by_blank_line() {
        let registry = VenueRegistry::builtin();
        let options = ReportOptions {
            quiet: false,
            mode: RenderMode::Markdown,
        };
        let text = compose(&batch(true), &registry, &options).expect("compose");
        assert!(text.contains("[Clinical NER](https://x/12)\n\n[Parsing](https://x/7)"));
    }

    #[test]
    fn test_only_unknown() {
        let registry = VenueRegistry::builtin();
        let only_unknown = BatchReport {
            outcomes: vec![outcome(
                "zzz",
                Vec::new(),
                Some(MedaiError::UnknownVenue {
                    venue: "zzz".to_string(),
                }),
            )],
            include_all: false,
        };
        let text = compose(&only_unknown, &registry, &ReportOptions::default()).expect("compose");
        assert_eq!(text, registry.usage_hint("zzz"));
    }
}
