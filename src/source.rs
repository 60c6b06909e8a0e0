//! Source adapters for the known listing page families.
//!
//! Each adapter knows how to locate paper nodes in a parsed page and how to pull
//! the title, URL and (where the page carries them) authors out of one node.
//! Selectors are compiled once when the adapter is built.

use crate::error::{MedaiError, OptionExt, Result};
use crate::venues::SourceId;
use scraper::{ElementRef, Html, Selector};

/// Site origin prepended to ACL Anthology paper paths
pub const ACL_ORIGIN: &str = "https://aclweb.org";

/// Only hrefs under this path point at an individual paper
pub const ACL_PAPER_PREFIX: &str = "/anthology/paper";

/// Extraction rules for one page family
#[derive(Debug, Clone)]
pub enum SourceAdapter {
    /// Flat anchors whose class is exactly `align-middle`, one per paper.
    /// Badge links carry extra classes and are not located. No author or
    /// abstract data.
    AclAnthology {
        nodes: Selector,
    },
    /// Title spans nested inside proceedings entries.
    Dblp {
        nodes: Selector,
        authors: Selector,
    },
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| MedaiError::Parse(e.to_string()))
}

impl SourceAdapter {
    /// Build the adapter for a source family.
    ///
    /// # Errors
    ///
    /// Returns `Parse` if a built-in selector fails to compile.
    pub fn new(source: SourceId) -> Result<Self> {
        match source {
            SourceId::AclAnthology => Ok(SourceAdapter::AclAnthology {
                nodes: compile(r#"a[class="align-middle"]"#)?,
            }),
            SourceId::Dblp => Ok(SourceAdapter::Dblp {
                nodes: compile(r#"span[class="title"]"#)?,
                authors: compile(r#"span[itemprop="author"]"#)?,
            }),
        }
    }

    pub fn source(&self) -> SourceId {
        match self {
            SourceAdapter::AclAnthology { .. } => SourceId::AclAnthology,
            SourceAdapter::Dblp { .. } => SourceId::Dblp,
        }
    }

    /// Paper nodes in document order
    pub fn locate<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let nodes = match self {
            SourceAdapter::AclAnthology { nodes } | SourceAdapter::Dblp { nodes, .. } => nodes,
        };
        document.select(nodes).collect()
    }

    /// Node text with whitespace runs collapsed
    pub fn title_of(&self, node: ElementRef<'_>) -> String {
        collapse_whitespace(node.text())
    }

    /// Absolute paper URL for a node.
    ///
    /// `Ok(None)` means the node is not a paper (e.g. a volume header link).
    ///
    /// # Errors
    ///
    /// Returns `AdapterMismatch` when a dblp entry is missing one of the
    /// elements between the title and its link.
    pub fn url_of(&self, node: ElementRef<'_>) -> Result<Option<String>> {
        match self {
            SourceAdapter::AclAnthology { .. } => Ok(node
                .value()
                .attr("href")
                .filter(|href| href.starts_with(ACL_PAPER_PREFIX))
                .map(|href| format!("{}{}", ACL_ORIGIN, href))),
            SourceAdapter::Dblp { .. } => dblp_link(node).map(Some),
        }
    }

    /// Author names, or `None` when the page family carries no author data
    pub fn authors_of(&self, node: ElementRef<'_>) -> Option<Vec<String>> {
        match self {
            SourceAdapter::AclAnthology { .. } => None,
            SourceAdapter::Dblp { authors, .. } => {
                let data = parent_element(node)?;
                Some(
                    data.select(authors)
                        .map(|a| collapse_whitespace(a.text()))
                        .filter(|name| !name.is_empty())
                        .collect(),
                )
            }
        }
    }

    /// Abstract text, or `None` when the page family carries none.
    ///
    /// Neither listing page includes abstracts.
    pub fn abstract_of(&self, _node: ElementRef<'_>) -> Option<String> {
        match self {
            SourceAdapter::AclAnthology { .. } | SourceAdapter::Dblp { .. } => None,
        }
    }
}

/// One compiled adapter per known source
#[derive(Debug, Clone)]
pub struct SourceAdapters {
    acl: SourceAdapter,
    dblp: SourceAdapter,
}

impl SourceAdapters {
    pub fn new() -> Result<Self> {
        Ok(Self {
            acl: SourceAdapter::new(SourceId::AclAnthology)?,
            dblp: SourceAdapter::new(SourceId::Dblp)?,
        })
    }

    pub fn get(&self, source: SourceId) -> &SourceAdapter {
        match source {
            SourceId::AclAnthology => &self.acl,
            SourceId::Dblp => &self.dblp,
        }
    }
}

fn collapse_whitespace<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parent_element(node: ElementRef<'_>) -> Option<ElementRef<'_>> {
    node.parent().and_then(ElementRef::wrap)
}

fn child_element<'a>(node: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    node.children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == name)
}

/// Walk from a dblp title span to the entry's primary link.
///
/// ```text
/// li.entry
/// ├── nav.publ > ul > li.drop-down > div.head > a[href]
/// └── cite.data > span.title
/// ```
fn dblp_link(title: ElementRef<'_>) -> Result<String> {
    let label = collapse_whitespace(title.text());

    let data = parent_element(title).ok_or_mismatch("cite", &label)?;
    let entry = parent_element(data).ok_or_mismatch("entry", &label)?;
    let nav = child_element(entry, "nav").ok_or_mismatch("nav", &label)?;
    let list = child_element(nav, "ul").ok_or_mismatch("ul", &label)?;
    let item = child_element(list, "li").ok_or_mismatch("li", &label)?;
    let head = child_element(item, "div").ok_or_mismatch("div", &label)?;
    let anchor = child_element(head, "a").ok_or_mismatch("a", &label)?;

    anchor
        .value()
        .attr("href")
        .map(str::to_string)
        .ok_or_mismatch("href", &label)
}
