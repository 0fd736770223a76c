//! Struct fields and enum variants.

use crate::consts::MEMBER_TITLE_LEVEL;
use crate::context::ResolutionContext;
use crate::event::TagEvent;
use crate::extract::{
    Progress, depth_delta, is_docblock, is_section_heading, is_skipped_anchor, item_id,
};
use crate::markdown::{MarkdownSpan, Prose};
use crate::type_expr::{SlotReader, TypeExpression};

/// A member as read from the page.
#[derive(Debug)]
pub(crate) struct RawMember {
    pub name: String,
    pub ty: Option<TypeExpression>,
    /// Signature text without anchors that are not part of the type.
    pub signature: String,
    pub doc: Prose,
}

#[derive(Debug)]
enum State {
    Signature {
        depth: i32,
        skipping: bool,
        reader: SlotReader,
    },
    AwaitingDoc,
    Doc(MarkdownSpan),
    Done,
}

/// Reads one member: the heading element carrying its id, then the next
/// prose block.
#[derive(Debug)]
pub(crate) struct MemberExtractor {
    name: String,
    prefix: &'static str,
    state: State,
    ty: Option<TypeExpression>,
    signature: String,
    doc: Prose,
}

impl MemberExtractor {
    /// Start reading after the opening tag of the member heading.
    pub(crate) fn new(name: &str, prefix: &'static str) -> Self {
        Self {
            name: name.to_owned(),
            prefix,
            state: State::Signature {
                depth: 0,
                skipping: false,
                reader: SlotReader::new(),
            },
            ty: None,
            signature: String::new(),
            doc: Prose::default(),
        }
    }

    pub(crate) fn advance(&mut self, event: &TagEvent, ctx: &mut ResolutionContext) -> Progress {
        match &mut self.state {
            State::Signature {
                depth,
                skipping,
                reader,
            } => {
                *depth += depth_delta(event);
                if *depth < 0 {
                    let reader = std::mem::take(reader);
                    self.ty = reader
                        .finish(ctx)
                        .into_iter()
                        .map(|slot| slot.ty)
                        .find(TypeExpression::is_complete);
                    self.state = State::AwaitingDoc;
                    return Progress::Pending;
                }
                if is_skipped_anchor(event) {
                    *skipping = true;
                } else if *skipping {
                    if event.is_end_of("a") {
                        *skipping = false;
                    }
                } else {
                    if let TagEvent::Text(text) = event {
                        self.signature.push_str(text);
                    }
                    reader.advance(event, ctx);
                }
                Progress::Pending
            }
            State::AwaitingDoc => {
                if item_id(event, self.prefix).is_some() || is_section_heading(event) {
                    return Progress::Yield;
                }
                if is_docblock(event) {
                    self.state = State::Doc(ctx.prose_span(MEMBER_TITLE_LEVEL));
                }
                Progress::Pending
            }
            State::Doc(span) => {
                span.advance(event);
                if span.is_complete() {
                    let span = std::mem::replace(span, MarkdownSpan::new(0, 0));
                    self.doc = span.finish();
                    self.state = State::Done;
                    return Progress::Complete;
                }
                Progress::Pending
            }
            State::Done => Progress::Yield,
        }
    }

    pub(crate) fn finish(mut self, ctx: &mut ResolutionContext) -> RawMember {
        match self.state {
            State::Signature { reader, .. } => {
                self.ty = reader
                    .finish(ctx)
                    .into_iter()
                    .map(|slot| slot.ty)
                    .find(TypeExpression::is_complete);
            }
            State::Doc(span) => self.doc = span.finish(),
            State::AwaitingDoc | State::Done => {}
        }
        // Struct-like variants document their fields separately.
        let ty = self.ty.filter(|_| !self.signature.contains('{'));
        RawMember {
            name: self.name,
            ty,
            signature: self.signature.trim().to_owned(),
            doc: self.doc,
        }
    }
}

/// Page of members: a prose block before the first member, then members.
#[derive(Debug)]
pub(crate) struct MemberPage {
    prefix: &'static str,
    doc_span: Option<MarkdownSpan>,
    doc: Option<Prose>,
    current: Option<MemberExtractor>,
    members: Vec<RawMember>,
    title_level: usize,
    /// Set once a section heading is seen; later prose belongs to sections.
    in_sections: bool,
}

impl MemberPage {
    pub(crate) fn new(prefix: &'static str, title_level: usize) -> Self {
        Self {
            prefix,
            doc_span: None,
            doc: None,
            current: None,
            members: Vec::new(),
            title_level,
            in_sections: false,
        }
    }

    pub(crate) fn advance(&mut self, event: &TagEvent, ctx: &mut ResolutionContext) {
        if let Some(member) = &mut self.current {
            match member.advance(event, ctx) {
                Progress::Pending => return,
                Progress::Complete => {
                    self.finish_member(ctx);
                    return;
                }
                Progress::Yield => self.finish_member(ctx),
            }
        }

        if let Some(span) = &mut self.doc_span {
            span.advance(event);
            if span.is_complete() {
                self.doc = self.doc_span.take().map(MarkdownSpan::finish);
            }
            return;
        }

        if let Some(name) = item_id(event, self.prefix) {
            ctx.enter_item(Some(name));
            self.current = Some(MemberExtractor::new(name, self.prefix));
        } else if is_section_heading(event) {
            self.in_sections = true;
        } else if self.doc.is_none()
            && !self.in_sections
            && self.members.is_empty()
            && is_docblock(event)
        {
            self.doc_span = Some(ctx.prose_span(self.title_level));
        }
    }

    fn finish_member(&mut self, ctx: &mut ResolutionContext) {
        if let Some(member) = self.current.take() {
            self.members.push(member.finish(ctx));
        }
        ctx.enter_item(None);
    }

    /// Page doc and members in page order.
    pub(crate) fn finish(mut self, ctx: &mut ResolutionContext) -> (Prose, Vec<RawMember>) {
        self.finish_member(ctx);
        let doc = match (self.doc, self.doc_span) {
            (Some(doc), _) => doc,
            (None, Some(span)) => span.finish(),
            (None, None) => Prose::default(),
        };
        (doc, self.members)
    }
}
