//! Trait methods: signature, optional stability notice and prose.

use crate::consts::{METHOD_ID_PREFIX, METHOD_TITLE_LEVEL};
use crate::context::ResolutionContext;
use crate::document::{MethodEntry, Param};
use crate::event::TagEvent;
use crate::extract::{
    Progress, depth_delta, is_docblock, is_section_heading, is_skipped_anchor, is_stability,
};
use crate::markdown::{MarkdownSpan, Prose};
use crate::type_expr::{Slot, SlotReader, TypeExpression};

/// Provided methods end the list of required methods.
const PROVIDED_METHOD_ID_PREFIX: &str = "method.";

#[derive(Debug)]
enum State {
    Signature {
        depth: i32,
        /// The opening parenthesis of the parameter list was seen.
        in_params: bool,
        skipping: bool,
        /// The return slot completed; the rest of the signature is ignored.
        returned: bool,
        reader: Option<SlotReader>,
    },
    AwaitingDoc,
    Stability {
        span: MarkdownSpan,
        deprecated: bool,
    },
    Doc(MarkdownSpan),
    Done,
}

/// Reads one required trait method, starting right after the opening tag of
/// the element whose id is `tymethod.<name>`.
#[derive(Debug)]
pub struct MethodExtractor {
    name: String,
    state: State,
    slots: Vec<Slot>,
    deprecation: Option<Prose>,
    doc: Prose,
}

impl MethodExtractor {
    /// Create an extractor for method `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        // Subscription plumbing has fixed summaries.
        let reader = (!is_subscription(name)).then(SlotReader::new);
        Self {
            name: name.to_owned(),
            state: State::Signature {
                depth: 0,
                in_params: false,
                skipping: false,
                returned: false,
                reader,
            },
            slots: Vec::new(),
            deprecation: None,
            doc: Prose::default(),
        }
    }

    /// Consume one event.
    pub fn advance(&mut self, event: &TagEvent, ctx: &mut ResolutionContext) -> Progress {
        match &mut self.state {
            State::Signature {
                depth,
                in_params,
                skipping,
                returned,
                reader,
            } => {
                *depth += depth_delta(event);
                if *depth < 0 {
                    if let Some(reader) = reader.take() {
                        self.slots.extend(reader.finish(ctx));
                    }
                    self.state = State::AwaitingDoc;
                    return Progress::Pending;
                }
                let Some(slot_reader) = reader.as_mut() else {
                    return Progress::Pending;
                };
                if *returned {
                    return Progress::Pending;
                }
                if is_skipped_anchor(event) {
                    *skipping = true;
                    return Progress::Pending;
                }
                if *skipping {
                    *skipping = !event.is_end_of("a");
                    return Progress::Pending;
                }
                if !*in_params {
                    // `fn name<T>(` before the parameter list.
                    let TagEvent::Text(text) = event else {
                        return Progress::Pending;
                    };
                    let Some(start) = text.find('(') else {
                        return Progress::Pending;
                    };
                    *in_params = true;
                    slot_reader.advance(&TagEvent::text(&text[start..]), ctx);
                } else {
                    slot_reader.advance(event, ctx);
                }
                if slot_reader.slots().last().is_some_and(Slot::is_return) {
                    *returned = true;
                    if let Some(reader) = reader.take() {
                        self.slots.extend(reader.finish(ctx));
                    }
                }
                Progress::Pending
            }
            State::AwaitingDoc => {
                if is_method_heading(event) || is_section_heading(event) {
                    self.state = State::Done;
                    return Progress::Yield;
                }
                if is_stability(event) {
                    self.state = State::Stability {
                        span: ctx.prose_span(0),
                        deprecated: false,
                    };
                } else if is_docblock(event) {
                    self.state = State::Doc(ctx.prose_span(METHOD_TITLE_LEVEL));
                }
                Progress::Pending
            }
            State::Stability { span, deprecated } => {
                *deprecated |= event.class_contains("deprecated");
                span.advance(event);
                if span.is_complete() {
                    let span = std::mem::replace(span, MarkdownSpan::new(0, 0));
                    if *deprecated {
                        self.deprecation = Some(deprecation_note(&span.finish()));
                    }
                    self.state = State::AwaitingDoc;
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

    /// Build the method entry from what was read.
    pub fn finish(self, ctx: &mut ResolutionContext) -> MethodEntry {
        let mut slots = self.slots;
        let mut deprecation = self.deprecation;
        let mut doc = self.doc;
        match self.state {
            State::Signature {
                reader: Some(reader),
                ..
            } => slots.extend(reader.finish(ctx)),
            State::Stability { span, deprecated } => {
                if deprecated {
                    deprecation = Some(deprecation_note(&span.finish()));
                }
            }
            State::Doc(span) => doc = span.finish(),
            _ => {}
        }

        let (params, result) = match self.name.as_str() {
            "subscribe" => (
                vec![fixed_param("topic", "string")],
                Some(TypeExpression::fixed("string")),
            ),
            "unsubscribe" => (
                vec![fixed_param("id", "string")],
                Some(TypeExpression::fixed("boolean")),
            ),
            _ => split_signature(slots),
        };

        MethodEntry {
            name: self.name,
            params,
            result,
            doc,
            deprecation,
        }
    }
}

fn is_subscription(name: &str) -> bool {
    matches!(name, "subscribe" | "unsubscribe")
}

fn is_method_heading(event: &TagEvent) -> bool {
    event.id().is_some_and(|id| {
        id.starts_with(METHOD_ID_PREFIX) || id.starts_with(PROVIDED_METHOD_ID_PREFIX)
    })
}

fn fixed_param(name: &str, ty: &str) -> Param {
    Param {
        name: name.to_owned(),
        ty: TypeExpression::fixed(ty),
    }
}

/// Parameters up to the return slot, and the return type.
fn split_signature(slots: Vec<Slot>) -> (Vec<Param>, Option<TypeExpression>) {
    let mut params = Vec::new();
    let mut result = None;
    for slot in slots {
        if slot.is_return() {
            result = Some(slot.ty);
            break;
        }
        params.push(Param {
            name: slot.name,
            ty: slot.ty,
        });
    }
    (params, result)
}

/// Stability text without the leading emoji marker.
fn deprecation_note(prose: &Prose) -> Prose {
    Prose::from(prose.as_str().trim_start_matches(|c: char| !c.is_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tokenize;

    /// Feed a method heading and what follows it, returning the entry and the
    /// event that was yielded, if any.
    fn read(html: &str) -> (MethodEntry, Option<TagEvent>, ResolutionContext) {
        let events = tokenize(html).unwrap();
        let mut ctx = ResolutionContext::new();
        ctx.enter_page("ckb_rpc/module/trait.ChainRpc.html");
        let name = events[0]
            .id()
            .and_then(|id| id.strip_prefix(METHOD_ID_PREFIX))
            .unwrap()
            .to_owned();
        let mut extractor = MethodExtractor::new(&name);
        let mut yielded = None;
        for event in &events[1..] {
            match extractor.advance(event, &mut ctx) {
                Progress::Pending => {}
                Progress::Complete => break,
                Progress::Yield => {
                    yielded = Some(event.clone());
                    break;
                }
            }
        }
        (extractor.finish(&mut ctx), yielded, ctx)
    }

    const GET_BLOCK: &str = r##"<section id="tymethod.get_block" class="method"><a class="src rightside" href="../../src/ckb_rpc/module/chain.rs.html#10">source</a><h4 class="code-header">fn <a href="#tymethod.get_block" class="fn">get_block</a>(
    &amp;self,
    block_hash: <a class="struct" href="../../ckb_jsonrpc_types/struct.H256.html">H256</a>,
    verbosity: <a class="enum" href="https://doc.rust-lang.org/nightly/core/option/enum.Option.html">Option</a>&lt;<a class="type" href="../../ckb_jsonrpc_types/type.Uint32.html">Uint32</a>&gt;,
) -&gt; <a class="type" href="https://docs.rs/jsonrpc-core/18.0.0/jsonrpc_core/type.Result.html">Result</a>&lt;<a class="enum" href="https://doc.rust-lang.org/nightly/core/option/enum.Option.html">Option</a>&lt;<a class="struct" href="../../ckb_jsonrpc_types/struct.BlockView.html">BlockView</a>&gt;&gt;</h4></section></summary><div class="docblock"><p>Returns the information about a block by hash.</p>
<h2 id="params"><a href="#params">Params</a></h2>
<ul><li><code>block_hash</code> - the block hash.</li></ul></div></details>"##;

    #[test]
    fn test_signature_and_doc() {
        let (method, _, ctx) = read(GET_BLOCK);
        assert_eq!(method.name, "get_block");
        let params: Vec<_> = method
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.ty.render()))
            .collect();
        assert_eq!(
            params,
            vec![
                ("block_hash", "[H256](#type-h256)"),
                ("verbosity", "[Uint32](#type-uint32) | null"),
            ]
        );
        assert_eq!(
            method.result.as_ref().map(TypeExpression::render),
            Some("[BlockView](#type-blockview) | null")
        );
        assert_eq!(
            method.doc.as_str(),
            "Returns the information about a block by hash.\n\n###### Params\n\n* `block_hash` - the block hash."
        );
        assert!(!method.is_deprecated());
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_old_rustdoc_layout() {
        let html = r##"<h3 id="tymethod.get_tip_header" class="method"><code id="get_tip_header.v">fn <a href="#tymethod.get_tip_header" class="fnname">get_tip_header</a>(&amp;self) -&gt; <a class="type" href="../../jsonrpc_core/type.Result.html">Result</a>&lt;<a class="struct" href="../../ckb_jsonrpc_types/struct.HeaderView.html">HeaderView</a>&gt;</code><a class="srclink" href="../../src/ckb_rpc/module/chain.rs.html#20" title="goto source code">[src]</a></h3><div class="docblock"><p>Returns the tip header.</p></div>"##;
        let (method, _, _) = read(html);
        assert!(method.params.is_empty());
        assert_eq!(
            method.result.as_ref().map(TypeExpression::render),
            Some("[HeaderView](#type-headerview)")
        );
        assert_eq!(method.doc.as_str(), "Returns the tip header.");
    }

    #[test]
    fn test_deprecated_method() {
        let html = r##"<section id="tymethod.get_cells" class="method"><h4 class="code-header">fn <a href="#tymethod.get_cells" class="fn">get_cells</a>(&amp;self) -&gt; <a href="../../jsonrpc_core/type.Result.html">Result</a>&lt;()&gt;</h4></section><span class="item-info"><div class="stab deprecated"><span class="emoji">👎</span><span>Deprecated since 0.36.0: Use the indexer instead.</span></div></span><div class="docblock"><p>Old.</p></div>"##;
        let (method, _, _) = read(html);
        assert!(method.is_deprecated());
        assert_eq!(
            method.deprecation.as_ref().map(Prose::as_str),
            Some("Deprecated since 0.36.0: Use the indexer instead.")
        );
        assert_eq!(method.result.as_ref().map(TypeExpression::render), Some("null"));
        assert_eq!(method.doc.as_str(), "Old.");
    }

    #[test]
    fn test_stability_without_deprecation() {
        let html = r##"<section id="tymethod.a"><h4>fn a(&amp;self)</h4></section><span class="item-info"><div class="stab unstable">Experimental</div></span><div class="docblock"><p>Doc.</p></div>"##;
        let (method, _, _) = read(html);
        assert!(!method.is_deprecated());
        assert_eq!(method.doc.as_str(), "Doc.");
        assert_eq!(method.result, None);
    }

    #[test]
    fn test_next_method_yields() {
        let html = r##"<section id="tymethod.a"><h4>fn a(&amp;self) -&gt; ()</h4></section><section id="tymethod.b"><h4>fn b(&amp;self)</h4></section>"##;
        let (method, yielded, _) = read(html);
        assert!(method.doc.is_empty());
        assert_eq!(method.result.as_ref().map(TypeExpression::render), Some("null"));
        assert_eq!(yielded.as_ref().and_then(TagEvent::id), Some("tymethod.b"));
    }

    #[test]
    fn test_section_heading_yields() {
        let html = r##"<section id="tymethod.a"><h4>fn a(&amp;self)</h4></section><h2 id="implementors">Implementors</h2><div class="docblock"><p>x</p></div>"##;
        let (method, yielded, _) = read(html);
        assert!(method.doc.is_empty());
        assert!(yielded.is_some_and(|event| event.is_start_of("h2")));
    }

    #[test]
    fn test_subscription_summaries_are_fixed() {
        let html = r##"<section id="tymethod.subscribe"><h4>fn <a href="#tymethod.subscribe">subscribe</a>(&amp;self, meta: Self::Metadata, subscriber: <a href="../../jsonrpc_pubsub/typed/struct.Subscriber.html">Subscriber</a>&lt;<a href="https://doc.rust-lang.org/nightly/alloc/string/struct.String.html">String</a>&gt;, topic: <a href="enum.Topic.html">Topic</a>)</h4></section><div class="docblock"><p>Subscribes.</p></div>"##;
        let (method, _, mut ctx) = read(html);
        assert_eq!(method.params.len(), 1);
        assert_eq!(method.params[0].name, "topic");
        assert_eq!(method.params[0].ty.render(), "string");
        assert_eq!(method.result.as_ref().map(TypeExpression::render), Some("string"));
        assert_eq!(ctx.next_pending(), None);

        let html = r##"<section id="tymethod.unsubscribe"><h4>fn unsubscribe(&amp;self, id: <a href="struct.SubscriptionId.html">SubscriptionId</a>)</h4></section>"##;
        let (method, _, _) = read(html);
        assert_eq!(method.params[0].name, "id");
        assert_eq!(method.result.as_ref().map(TypeExpression::render), Some("boolean"));
    }

    #[test]
    fn test_parameter_count_matches_signature() {
        let html = r##"<section id="tymethod.f"><h4>fn <a href="#tymethod.f">f</a>(&amp;self, a: <a href="struct.A.html">A</a>, b: <a href="struct.B.html">B</a>, c: u64) -&gt; <a href="struct.R.html">R</a></h4></section>"##;
        let (method, _, _) = read(html);
        let names: Vec<_> = method.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(method.params[2].ty.render(), "[Uint64](#type-uint64)");
        assert_eq!(
            method.result.as_ref().map(TypeExpression::render),
            Some("[R](#type-r)")
        );
    }
}
