//! Markup-to-Markdown conversion for documentation spans.
//!
//! A [`MarkdownSpan`] is created right after the opening tag of the element
//! that holds the prose (usually `<div class="docblock">`) and consumes
//! events until that element closes. Only a small vocabulary of structural
//! tags is translated; everything else contributes its text and nesting
//! depth but no markup.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::consts::ERROR_ENUM_PAGE;
use crate::event::{TagEvent, is_void_element};
use crate::link::rewrite_link;

/// Whitespace run containing at least one line break.
static LINE_BREAK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r]*\n\s*").expect("invalid line break regex"));

/// Indentation added for the content of a list item.
const LIST_INDENT: usize = 4;

/// Rendered Markdown prose with trailing whitespace removed from every line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prose(String);

impl Prose {
    /// Markdown text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no prose was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First paragraph folded into a single line, for table cells.
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .split("\n\n")
            .find(|paragraph| !paragraph.trim().is_empty())
            .map(|paragraph| {
                paragraph
                    .lines()
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}

impl From<&str> for Prose {
    fn from(text: &str) -> Self {
        Self(text.trim().to_owned())
    }
}

impl fmt::Display for Prose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-flight anchor.
#[derive(Debug)]
enum PendingLink {
    Target(String),
    /// Self-link on a heading, or an anchor without `href`.
    Suppressed,
}

/// Converter state for one span of markup.
///
/// Depth starts at 0 and the span is complete once it goes negative, which
/// happens on the end tag of the element enclosing the span.
#[derive(Debug)]
pub struct MarkdownSpan {
    chunks: Vec<String>,
    depth: i32,
    title_level: usize,
    indent: usize,
    preformatted: bool,
    pending_link: Option<PendingLink>,
    table_cols: usize,
    /// Chunk count right after the last heading marker, while the heading is open.
    heading_mark: Option<usize>,
    error_page: String,
}

impl MarkdownSpan {
    /// Create a converter.
    ///
    /// `title_level` is added to every heading level; `indent` is applied to
    /// every line after the first.
    #[must_use]
    pub fn new(title_level: usize, indent: usize) -> Self {
        Self {
            chunks: Vec::new(),
            depth: 0,
            title_level,
            indent,
            preformatted: false,
            pending_link: None,
            table_cols: 0,
            heading_mark: None,
            error_page: ERROR_ENUM_PAGE.to_owned(),
        }
    }

    /// Rewrite variant links into the page with this file name as error
    /// anchors.
    #[must_use]
    pub fn with_error_page(mut self, file_name: &str) -> Self {
        file_name.clone_into(&mut self.error_page);
        self
    }

    /// Nesting depth relative to the start of the span.
    #[must_use]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Whether the enclosing element has closed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.depth < 0
    }

    /// Consume one event. Events after completion are ignored.
    pub fn advance(&mut self, event: &TagEvent) {
        if self.is_complete() {
            return;
        }
        match event {
            TagEvent::Start { name, .. } => self.start_tag(name, event),
            TagEvent::End { name } => self.end_tag(name),
            TagEvent::Text(text) => self.text(text),
        }
    }

    /// Finish the span and render the collected Markdown.
    #[must_use]
    pub fn finish(self) -> Prose {
        let joined = self.chunks.concat();
        let mut lines: Vec<&str> = Vec::new();
        let mut in_fence = false;
        for line in joined.lines().map(str::trim_end) {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
            }
            let blank = line.is_empty();
            let after_blank = lines.last().is_none_or(|last| last.is_empty());
            if blank && after_blank && !in_fence {
                continue;
            }
            lines.push(line);
        }
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        Prose(lines.join("\n"))
    }

    fn append(&mut self, text: &str) {
        if self.indent == 0 || !text.contains('\n') {
            self.chunks.push(text.to_owned());
        } else {
            let newline = format!("\n{}", " ".repeat(self.indent));
            self.chunks.push(text.replace('\n', &newline));
        }
    }

    fn heading_is_empty(&self) -> bool {
        self.heading_mark == Some(self.chunks.len())
    }

    fn start_tag(&mut self, name: &str, event: &TagEvent) {
        if is_void_element(name) {
            match name {
                "br" => self.append("\n"),
                "hr" => self.append("\n\n---\n\n"),
                _ => {}
            }
            return;
        }

        self.depth += 1;
        match name {
            "p" | "table" => self.append("\n\n"),
            "li" => {
                self.append("\n* ");
                self.indent += LIST_INDENT;
            }
            "pre" => {
                let language = code_language(event);
                self.append(&format!("\n\n```{language}\n"));
                self.preformatted = true;
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = usize::from(name.as_bytes()[1] - b'0');
                self.append("\n\n");
                self.append(&format!("{} ", "#".repeat(level + self.title_level)));
                self.heading_mark = Some(self.chunks.len());
            }
            "strong" | "b" => self.append("**"),
            "em" | "i" => self.append("*"),
            "code" if !self.preformatted => self.append("`"),
            "a" => {
                let link = match event.attr("href") {
                    Some(href) if !self.heading_is_empty() => {
                        self.append("[");
                        PendingLink::Target(rewrite_link(href, &self.error_page))
                    }
                    _ => PendingLink::Suppressed,
                };
                self.pending_link = Some(link);
            }
            "thead" => self.table_cols = 0,
            "tr" => self.append("\n"),
            "th" | "td" => {
                self.table_cols += 1;
                self.append("| ");
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        if is_void_element(name) {
            return;
        }

        self.depth -= 1;
        if self.depth < 0 {
            return;
        }
        match name {
            "p" => self.append("\n"),
            "li" => self.indent = self.indent.saturating_sub(LIST_INDENT),
            "pre" => {
                let closed_line = self
                    .chunks
                    .last()
                    .is_some_and(|c| c.trim_end_matches(' ').ends_with('\n'));
                self.append(if closed_line { "```\n" } else { "\n```\n" });
                self.preformatted = false;
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.heading_mark = None;
                self.append("\n");
            }
            "strong" | "b" => self.append("**"),
            "em" | "i" => self.append("*"),
            "code" if !self.preformatted => self.append("`"),
            "a" => {
                if let Some(PendingLink::Target(target)) = self.pending_link.take() {
                    self.append(&format!("]({target})"));
                }
            }
            "thead" => {
                let separator = format!("\n|{}", "---|".repeat(self.table_cols));
                self.append(&separator);
            }
            "th" | "td" => self.append(" "),
            "tr" => self.append("|"),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.preformatted {
            self.append(text);
            return;
        }
        if self.heading_is_empty() && text.trim().is_empty() {
            return;
        }
        // Line breaks inside prose would turn into Markdown line breaks.
        let collapsed = LINE_BREAK_PATTERN.replace_all(text, " ");
        self.append(&collapsed);
    }
}

/// Fence language from a `<pre class="language-json">` style class list.
fn code_language(event: &TagEvent) -> &str {
    event
        .attr("class")
        .and_then(|classes| {
            classes
                .split_whitespace()
                .find_map(|class| class.strip_prefix("language-"))
        })
        .unwrap_or("")
}
