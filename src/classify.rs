//! Keyword-based relevance classification of paper titles.
//!
//! A title is relevant when, for some keyword `k`, one of the three forms
//! `k`, `k` upper-cased, or `k` capitalized (first character upper, the rest
//! lower) either starts the title or follows a single space inside it.
//! There is no trailing boundary check, so `medic` matches `... medicine`.

use std::collections::HashSet;
use tracing::warn;

/// Built-in medical keyword list
pub const MEDICAL_KEYWORDS: &[&str] = &[
    "medic",
    "biomedic",
    "bioMedic",
    "health",
    "clinic",
    "EHR",
    "MeSH",
    "RCT",
    "life",
    "care",
    "pharm",
    "food-drug",
    "drug",
    "surg",
    "emergency",
    "ICU",
    "hospital",
    "patient",
    "doctor",
    "disease",
    "illness",
    "symptom",
    "treatment",
    "cancer",
    "psycholog",
    "psychiat",
    "mental",
    "radiol",
    "patho",
    "autopsy",
    "x-ray",
    "x-Ray",
    "mammogr",
    "CT",
    "MRI",
    "radiograph",
    "tomograph",
    "magnetic",
];

/// One keyword with its precomputed match forms
#[derive(Debug, Clone)]
struct Keyword {
    text: String,
    /// Distinct forms in `as given, upper, capitalized` order
    forms: Vec<String>,
    /// Same forms with a leading space
    spaced: Vec<String>,
}

impl Keyword {
    fn new(text: &str) -> Self {
        let mut forms: Vec<String> = Vec::with_capacity(3);
        for form in [text.to_string(), text.to_uppercase(), capitalize(text)] {
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
        let spaced = forms.iter().map(|f| format!(" {}", f)).collect();
        Self {
            text: text.to_string(),
            forms,
            spaced,
        }
    }

    fn matches(&self, title: &str) -> bool {
        self.forms.iter().any(|f| title.starts_with(f.as_str()))
            || self.spaced.iter().any(|f| title.contains(f.as_str()))
    }
}

/// Something about a keyword that the matching rule makes surprising
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordIssue {
    /// Upper-casing leaves the keyword unchanged
    UpperIsNoOp,
    /// Capitalizing leaves the keyword unchanged
    CapitalizeIsNoOp,
    /// Only the first segment is ever capitalized, so `Food-Drug` is missed
    HyphenatedInterior,
    /// Every form is already produced by an earlier keyword
    Duplicate { of: String },
    /// Cannot match a trimmed, whitespace-collapsed title
    Unreachable,
    /// Empty keyword, matches every title
    MatchesEverything,
}

/// Audit finding for one keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordAudit {
    pub keyword: String,
    pub issue: KeywordIssue,
}

/// Title relevance predicate over a fixed keyword list
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: Vec<Keyword>,
}

impl Classifier {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| Keyword::new(k.as_ref())).collect(),
        }
    }

    /// Classifier over [`MEDICAL_KEYWORDS`]
    pub fn medical() -> Self {
        Self::new(MEDICAL_KEYWORDS)
    }

    pub fn is_relevant(&self, title: &str) -> bool {
        self.keywords.iter().any(|k| k.matches(title))
    }

    /// Report keywords whose transforms are ineffective or that can never match
    pub fn audit(&self) -> Vec<KeywordAudit> {
        let mut findings = Vec::new();
        let mut seen: Vec<(&str, HashSet<&str>)> = Vec::new();

        for keyword in &self.keywords {
            let text = keyword.text.as_str();
            let mut report = |issue| {
                findings.push(KeywordAudit {
                    keyword: text.to_string(),
                    issue,
                })
            };

            if text.is_empty() {
                report(KeywordIssue::MatchesEverything);
                continue;
            }
            if text.starts_with(char::is_whitespace) {
                report(KeywordIssue::Unreachable);
            }
            if text.to_uppercase() == text {
                report(KeywordIssue::UpperIsNoOp);
            }
            if capitalize(text) == text {
                report(KeywordIssue::CapitalizeIsNoOp);
            }
            if has_lowercase_segment_after_hyphen(text) {
                report(KeywordIssue::HyphenatedInterior);
            }

            let forms: HashSet<&str> = keyword.forms.iter().map(String::as_str).collect();
            if let Some((earlier, _)) = seen.iter().find(|(_, prior)| forms.is_subset(prior)) {
                report(KeywordIssue::Duplicate {
                    of: earlier.to_string(),
                });
            }
            seen.push((text, forms));
        }

        findings
    }

    /// Log audit findings at warn level
    pub fn log_audit(&self) {
        for finding in self.audit() {
            warn!(keyword = %finding.keyword, issue = ?finding.issue, "Keyword audit");
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::medical()
    }
}

/// Some segment after a hyphen starts lower-case, so no form capitalizes it
fn has_lowercase_segment_after_hyphen(text: &str) -> bool {
    text.split('-')
        .skip(1)
        .any(|segment| segment.chars().next().is_some_and(char::is_lowercase))
}

/// First character upper-cased, the rest lower-cased
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
