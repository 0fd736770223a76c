//! Shared state of one generation run.
//!
//! The [`ResolutionContext`] owns the pending-type worklist, the visited set
//! and the collected diagnostics. The orchestrator creates one per run and
//! passes it by `&mut` into every page visit; extractors never keep it.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::link::resolve_page;
use crate::markdown::MarkdownSpan;

/// What went wrong on a page. None of these abort the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// More type arguments than the container declares.
    ExtraTypeArgument {
        /// Type receiving the argument.
        container: String,
        /// The surplus argument.
        argument: String,
    },
    /// A container closed before all its arguments were seen.
    MissingTypeArgument {
        /// Container type.
        container: String,
    },
    /// A container type was still open when its span ended.
    UnclosedType {
        /// Container type.
        container: String,
    },
    /// A parameter, return value or field without any type.
    UnresolvedSlot {
        /// Name of the slot.
        slot: String,
    },
    /// Redirect stubs lead back to an already visited page.
    RedirectLoop {
        /// Page the stub points at.
        target: String,
    },
    /// Redirect chain longer than the allowed number of hops.
    TooManyRedirects,
    /// Referenced page does not exist.
    MissingPage,
    /// Page kind that cannot be documented as a type.
    UnsupportedPage,
    /// Page could not be tokenized.
    Markup {
        /// Tokenizer error.
        message: String,
    },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtraTypeArgument {
                container,
                argument,
            } => write!(f, "extra type argument `{argument}` for `{container}`"),
            Self::MissingTypeArgument { container } => {
                write!(f, "missing type argument for `{container}`")
            }
            Self::UnclosedType { container } => write!(f, "unclosed type `{container}`"),
            Self::UnresolvedSlot { slot } => write!(f, "no type found for `{slot}`"),
            Self::RedirectLoop { target } => write!(f, "redirect loop through {target}"),
            Self::TooManyRedirects => f.write_str("too many redirects"),
            Self::MissingPage => f.write_str("page not found"),
            Self::UnsupportedPage => f.write_str("page kind cannot be documented"),
            Self::Markup { message } => write!(f, "malformed markup: {message}"),
        }
    }
}

/// A non-fatal problem found while reading a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Page identifier relative to the documentation root.
    pub page: String,
    /// Method, variant or field being extracted, if any.
    pub item: Option<String>,
    /// What went wrong.
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{} ({item}): {}", self.page, self.kind),
            None => write!(f, "{}: {}", self.page, self.kind),
        }
    }
}

/// Worklist, visited set and diagnostics of one run.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    page: String,
    item: Option<String>,
    pending: BTreeSet<String>,
    visited: HashSet<String>,
    /// Synthesized serialized type name → name of the type it serializes.
    serialized: BTreeMap<String, String>,
    diagnostics: Vec<Diagnostic>,
    /// File name of the error enum page, when not the default.
    error_page: Option<String>,
}

impl ResolutionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page that relative links and diagnostics refer to.
    pub fn enter_page(&mut self, page: &str) {
        page.clone_into(&mut self.page);
        self.item = None;
    }

    /// Set the error enum page whose variant links become error anchors.
    pub fn set_error_page(&mut self, page: &str) {
        let file_name = page.rsplit('/').next().unwrap_or(page);
        self.error_page = Some(file_name.to_owned());
    }

    /// Prose converter for a span starting at the current event.
    pub(crate) fn prose_span(&self, title_level: usize) -> MarkdownSpan {
        let span = MarkdownSpan::new(title_level, 0);
        match &self.error_page {
            Some(page) => span.with_error_page(page),
            None => span,
        }
    }

    /// Set the item that diagnostics refer to.
    pub fn enter_item(&mut self, item: Option<&str>) {
        self.item = item.map(str::to_owned);
    }

    /// Enqueue the page a link on the current page points at.
    ///
    /// Returns `false` if the link leaves the documentation tree or the page
    /// was already visited.
    pub fn enqueue_link(&mut self, href: &str) -> bool {
        match resolve_page(&self.page, href) {
            Some(page) => self.enqueue(page),
            None => false,
        }
    }

    /// Enqueue a normalized page identifier.
    pub fn enqueue(&mut self, page: String) -> bool {
        if self.visited.contains(&page) {
            return false;
        }
        self.pending.insert(page)
    }

    /// Take the next pending page, in lexical order.
    pub fn next_pending(&mut self) -> Option<String> {
        self.pending.pop_first()
    }

    /// Number of pages waiting to be visited.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Mark a page visited. Returns `false` if it already was.
    pub fn mark_visited(&mut self, page: &str) -> bool {
        self.pending.remove(page);
        self.visited.insert(page.to_owned())
    }

    /// Record a synthesized serialized type.
    pub fn record_serialized(&mut self, name: &str, base: &str) {
        self.serialized
            .entry(name.to_owned())
            .or_insert_with(|| base.to_owned());
    }

    /// Synthesized serialized types with the type each one serializes.
    pub fn serialized_types(&self) -> impl Iterator<Item = (&str, &str)> {
        self.serialized
            .iter()
            .map(|(name, base)| (name.as_str(), base.as_str()))
    }

    /// Record a diagnostic against the current page and item.
    pub fn report(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            page: self.page.clone(),
            item: self.item.clone(),
            kind,
        };
        tracing::warn!(page = %diagnostic.page, item = ?diagnostic.item, "{}", diagnostic.kind);
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the context, keeping only its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
