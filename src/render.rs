//! Text renderings of a paper collection.
//!
//! Double quotes in titles and abstracts become single quotes in every mode.
//! CSV output is written unquoted: an author list or title containing a comma
//! yields extra columns.

use crate::error::{MedaiError, Result};
use crate::extract::Paper;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// CSV header, one column per [`CsvRow`] field
pub const CSV_COLUMNS: &[&str] = &[
    "conference_name",
    "year",
    "title",
    "author",
    "url",
    "abstract",
    "medical",
];

/// How to render a paper list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Title line, URL line
    #[default]
    Plain,
    TitleOnly,
    UrlOnly,
    /// `[title](url)`
    Markdown,
    /// `[url](url)`
    MarkdownUrlOnly,
    /// `<a href=...>title</a>` joined by `<br/>`
    Html,
    HtmlUrlOnly,
    Csv,
}

impl RenderMode {
    /// Combine console flags. Markdown and HTML honour `url_only` and ignore `title_only`.
    pub fn from_flags(markdown: bool, html: bool, title_only: bool, url_only: bool) -> Self {
        match (markdown, html) {
            (true, _) if url_only => RenderMode::MarkdownUrlOnly,
            (true, _) => RenderMode::Markdown,
            (false, true) if url_only => RenderMode::HtmlUrlOnly,
            (false, true) => RenderMode::Html,
            (false, false) if title_only => RenderMode::TitleOnly,
            (false, false) if url_only => RenderMode::UrlOnly,
            (false, false) => RenderMode::Plain,
        }
    }

    fn separator(self) -> &'static str {
        match self {
            RenderMode::Html | RenderMode::HtmlUrlOnly => "<br/>\n\n",
            _ => "\n\n",
        }
    }
}

/// Render papers in the given mode, without a trailing separator.
///
/// # Errors
///
/// Only `Csv` mode can fail.
pub fn render<'a, I>(papers: I, mode: RenderMode) -> Result<String>
where
    I: IntoIterator<Item = &'a Paper>,
{
    if mode == RenderMode::Csv {
        let mut wtr = csv_writer().from_writer(Vec::new());
        write_rows(&mut wtr, papers)?;
        let bytes = wtr.into_inner().map_err(|e| MedaiError::Io(e.into_error()))?;
        let text = String::from_utf8(bytes).map_err(|e| MedaiError::Parse(e.to_string()))?;
        return Ok(text.trim_end_matches('\n').to_string());
    }

    let entries: Vec<String> = papers
        .into_iter()
        .map(|paper| render_one(paper, mode))
        .collect();
    Ok(entries.join(mode.separator()))
}

fn render_one(paper: &Paper, mode: RenderMode) -> String {
    let title = unquote(&paper.title);
    let url = paper.url.as_str();
    match mode {
        RenderMode::TitleOnly => title,
        RenderMode::UrlOnly => url.to_string(),
        RenderMode::Markdown => format!("[{}]({})", title, url),
        RenderMode::MarkdownUrlOnly => format!("[{0}]({0})", url),
        RenderMode::Html => anchor(url, &title),
        RenderMode::HtmlUrlOnly => anchor(url, url),
        _ => format!("{}\n{}", title, url),
    }
}

fn anchor(href: &str, label: &str) -> String {
    format!(
        r#"<a href="{0}" target="_blank" alt="{1}">{1}</a>"#,
        href, label
    )
}

fn unquote(text: &str) -> String {
    text.replace('"', "'")
}

/// One CSV record
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    conference_name: &'a str,
    year: &'a str,
    title: String,
    author: String,
    url: &'a str,
    #[serde(rename = "abstract")]
    abstract_text: String,
    medical: u8,
}

impl<'a> From<&'a Paper> for CsvRow<'a> {
    fn from(paper: &'a Paper) -> Self {
        Self {
            conference_name: &paper.venue,
            year: &paper.year,
            title: unquote(&paper.title),
            author: paper.authors.join(","),
            url: &paper.url,
            abstract_text: unquote(&paper.abstract_text),
            medical: u8::from(paper.is_relevant),
        }
    }
}

fn csv_writer() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.has_headers(false).quote_style(QuoteStyle::Never);
    builder
}

fn write_rows<'a, W, I>(wtr: &mut csv::Writer<W>, papers: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Paper>,
{
    wtr.write_record(CSV_COLUMNS)?;
    let mut count = 0;
    for paper in papers {
        wtr.serialize(CsvRow::from(paper))?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

/// Write papers to a CSV file, returning the number of rows written
pub fn save_csv<'a, I>(path: &Path, papers: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Paper>,
{
    let mut wtr = csv_writer().from_path(path)?;
    write_rows(&mut wtr, papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, url: &str) -> Paper {
        Paper {
            title: title.to_string(),
            authors: Vec::new(),
            abstract_text: String::new(),
            venue: "acl".to_string(),
            year: "2019".to_string(),
            url: url.to_string(),
            is_relevant: true,
        }
    }

    #[test]
    fn test_markdown_single() {
        let papers = [paper("ICU Sepsis Detection", "https://x/1")];
        assert_eq!(
            render(&papers, RenderMode::Markdown).expect("render"),
            "[ICU Sepsis Detection](https://x/1)"
        );
    }

    #[test]
    fn test_html_single() {
        let papers = [paper("ICU Sepsis Detection", "https://x/1")];
        assert_eq!(
            render(&papers, RenderMode::Html).expect("render"),
            r#"<a href="https://x/1" target="_blank" alt="ICU Sepsis Detection">ICU Sepsis Detection</a>"#
        );
    }

    #[test]
    fn test_plain_and_short_modes() {
        let papers = [paper("A", "https://x/1"), paper("B", "https://x/2")];
        assert_eq!(
            render(&papers, RenderMode::Plain).expect("render"),
            "A\nhttps://x/1\n\nB\nhttps://x/2"
        );
        assert_eq!(render(&papers, RenderMode::TitleOnly).expect("render"), "A\n\nB");
        assert_eq!(
            render(&papers, RenderMode::UrlOnly).expect("render"),
            "https://x/1\n\nhttps://x/2"
        );
        assert_eq!(
            render(&papers, RenderMode::Markdown).expect("render"),
            "[A](https://x/1)\n\n[B](https://x/2)"
        );
        assert_eq!(
            render(&papers, RenderMode::MarkdownUrlOnly).expect("render"),
            "[https://x/1](https://x/1)\n\n[https://x/2](https://x/2)"
        );
        assert_eq!(
            render(&papers, RenderMode::HtmlUrlOnly).expect("render"),
            "<a href=\"https://x/1\" target=\"_blank\" alt=\"https://x/1\">https://x/1</a><br/>\n\n\
             <a href=\"https://x/2\" target=\"_blank\" alt=\"https://x/2\">https://x/2</a>"
        );
    }

    #[test]
    fn test_quotes_become_single() {
        let papers = [paper(r#"The "Doctor" Is In"#, "https://x/1")];
        let html = render(&papers, RenderMode::Html).expect("render");
        assert!(html.contains(r#"alt="The 'Doctor' Is In""#));
        let plain = render(&papers, RenderMode::TitleOnly).expect("render");
        assert_eq!(plain, "The 'Doctor' Is In");
    }

    #[test]
    fn test_empty_render() {
        let papers: [Paper; 0] = [];
        assert_eq!(render(&papers, RenderMode::Plain).expect("render"), "");
        assert_eq!(
            render(&papers, RenderMode::Csv).expect("render"),
            "conference_name,year,title,author,url,abstract,medical"
        );
    }

    #[test]
    fn test_csv_rows() {
        let mut p = paper(r#"Say "Ah""#, "https://x/1");
        p.authors = vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()];
        p.abstract_text = r#"An "abstract""#.to_string();
        let mut q = paper("Parsing", "https://x/2");
        q.is_relevant = false;

        let csv = render(&[p, q], RenderMode::Csv).expect("render");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "conference_name,year,title,author,url,abstract,medical");
        assert_eq!(
            lines[1],
            "acl,2019,Say 'Ah',Ada Lovelace,Alan Turing,https://x/1,An 'abstract',1"
        );
        assert_eq!(lines[2], "acl,2019,Parsing,,https://x/2,,0");
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(RenderMode::from_flags(false, false, false, false), RenderMode::Plain);
        assert_eq!(RenderMode::from_flags(true, false, true, false), RenderMode::Markdown);
        assert_eq!(RenderMode::from_flags(true, false, false, true), RenderMode::MarkdownUrlOnly);
        assert_eq!(RenderMode::from_flags(false, true, false, true), RenderMode::HtmlUrlOnly);
        assert_eq!(RenderMode::from_flags(false, false, true, false), RenderMode::TitleOnly);
        assert_eq!(RenderMode::from_flags(false, false, false, true), RenderMode::UrlOnly);
    }

    #[test]
    fn test_save_csv() -> Result<()> {
        let temp = tempfile::NamedTempFile::new()?;
        let written = save_csv(temp.path(), &[paper("ICU Sepsis Detection", "https://x/1")])?;
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(temp.path())?;
        assert_eq!(
            content,
            "conference_name,year,title,author,url,abstract,medical\n\
             acl,2019,ICU Sepsis Detection,,https://x/1,,1\n"
        );
        Ok(())
    }
}
