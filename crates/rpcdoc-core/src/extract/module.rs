//! RPC module pages: one trait page per module.

use crate::consts::{METHOD_ID_PREFIX, MODULE_TITLE_LEVEL};
use crate::context::ResolutionContext;
use crate::document::{MethodEntry, ModuleEntry};
use crate::event::TagEvent;
use crate::extract::{MethodExtractor, Progress, is_docblock, is_section_heading};
use crate::markdown::{MarkdownSpan, Prose};

/// Module name from a trait page file name: `trait.ChainRpc.html` → `Chain`.
///
/// Returns `None` for files that are not trait pages.
#[must_use]
pub fn module_name(file_name: &str) -> Option<&str> {
    let trait_name = file_name.strip_prefix("trait.")?.strip_suffix(".html")?;
    let name = trait_name.strip_suffix("Rpc").unwrap_or(trait_name);
    (!name.is_empty()).then_some(name)
}

#[derive(Debug)]
enum State {
    Scanning,
    ModuleDoc(MarkdownSpan),
    Method(MethodExtractor),
}

#[derive(Debug)]
struct ModuleExtractor {
    state: State,
    doc: Option<Prose>,
    methods: Vec<MethodEntry>,
    in_sections: bool,
}

impl ModuleExtractor {
    fn advance(&mut self, event: &TagEvent, ctx: &mut ResolutionContext) {
        match &mut self.state {
            State::Method(method) => match method.advance(event, ctx) {
                Progress::Pending => return,
                Progress::Complete => {
                    self.finish_method(ctx);
                    return;
                }
                Progress::Yield => self.finish_method(ctx),
            },
            State::ModuleDoc(span) => {
                span.advance(event);
                if span.is_complete() {
                    let span = std::mem::replace(span, MarkdownSpan::new(0, 0));
                    self.doc = Some(span.finish());
                    self.state = State::Scanning;
                }
                return;
            }
            State::Scanning => {}
        }

        if let Some(name) = event.id().and_then(|id| id.strip_prefix(METHOD_ID_PREFIX)) {
            tracing::debug!(method = name, "Reading method");
            ctx.enter_item(Some(name));
            self.state = State::Method(MethodExtractor::new(name));
        } else if is_section_heading(event) {
            self.in_sections = true;
        } else if self.doc.is_none()
            && !self.in_sections
            && self.methods.is_empty()
            && is_docblock(event)
        {
            self.state = State::ModuleDoc(ctx.prose_span(MODULE_TITLE_LEVEL));
        }
    }

    fn finish_method(&mut self, ctx: &mut ResolutionContext) {
        if let State::Method(method) = std::mem::replace(&mut self.state, State::Scanning) {
            self.methods.push(method.finish(ctx));
        }
        ctx.enter_item(None);
    }

    fn finish(mut self, name: &str, ctx: &mut ResolutionContext) -> ModuleEntry {
        let doc = match std::mem::replace(&mut self.state, State::Scanning) {
            State::Method(method) => {
                self.methods.push(method.finish(ctx));
                self.doc
            }
            State::ModuleDoc(span) => Some(span.finish()),
            State::Scanning => self.doc,
        };
        ModuleEntry {
            name: name.to_owned(),
            doc: doc.unwrap_or_default(),
            methods: self.methods,
        }
    }
}

/// Extract a module from the events of its trait page.
pub fn extract_module(name: &str, events: &[TagEvent], ctx: &mut ResolutionContext) -> ModuleEntry {
    let mut extractor = ModuleExtractor {
        state: State::Scanning,
        doc: None,
        methods: Vec::new(),
        in_sections: false,
    };
    for event in events {
        extractor.advance(event, ctx);
    }
    extractor.finish(name, ctx)
}
