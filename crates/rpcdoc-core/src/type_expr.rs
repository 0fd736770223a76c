//! Type signatures to readable type expressions.
//!
//! Rustdoc renders a type such as `Option<Vec<H256>>` as text with one
//! anchor per path: `Option&lt;<a>Vec</a>&lt;<a>H256</a>&gt;&gt;`. A
//! [`TypeResolver`] reads one `name: Type` slot from that stream. The first
//! anchor fixes the kind of the root node; container kinds open child slots
//! that later anchors fill in order, and the angle brackets in the text
//! between anchors decide when a container is closed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::consts::{FUNCTION_ARROW, SELF_PARAM_PREFIX, SERIALIZED_PREFIX};
use crate::context::{DiagnosticKind, ResolutionContext};
use crate::event::TagEvent;
use crate::link::{declaration, is_external, type_link};

/// Display of a slot whose type could not be determined.
const UNKNOWN: &str = "unknown";

/// Receivers stripped from the first parameter name.
const RECEIVERS: &[&str] = &["&mut self", SELF_PARAM_PREFIX, "self"];

/// `name: u64` written as plain text instead of a primitive link.
static NUMERIC_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^:<>]*):\s*(?P<ty>u128|u64|u32)\b")
        .expect("invalid numeric suffix regex")
});

/// Shape of a container type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `T | null`
    Optional,
    /// `Array<T>`
    Sequence,
    /// `{ key: K ⇒ V }`
    Map,
    /// `A | SerializedB`
    TaggedUnion,
    /// `Paginated<T>`
    Paginated,
    /// Renders as its only argument.
    Transparent,
}

impl Shape {
    /// Container shape of a well-known generic type.
    #[must_use]
    pub fn of(name: &str) -> Option<Self> {
        let shape = match name {
            "Option" => Self::Optional,
            "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => Self::Sequence,
            "HashMap" | "BTreeMap" | "IndexMap" => Self::Map,
            "Either" | "ResponseFormat" => Self::TaggedUnion,
            "IndexerPagination" | "Pagination" | "Paginated" => Self::Paginated,
            "Result" | "RpcResult" | "Box" | "Arc" => Self::Transparent,
            _ => return None,
        };
        Some(shape)
    }

    /// Number of type arguments.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Map | Self::TaggedUnion => 2,
            _ => 1,
        }
    }
}

/// What the first anchor of a node says about it.
enum Kind {
    Terminal { name: String, display: String },
    Reference { name: String },
    Container { name: String, shape: Shape },
}

fn classify(href: &str) -> Kind {
    let Some(decl) = declaration(href) else {
        return Kind::Terminal {
            name: UNKNOWN.to_owned(),
            display: UNKNOWN.to_owned(),
        };
    };
    let name = decl.name.to_owned();
    if decl.kind == "primitive" {
        let display = primitive_display(decl.name);
        return Kind::Terminal { name, display };
    }
    if let Some(shape) = Shape::of(decl.name) {
        return Kind::Container { name, shape };
    }
    if decl.name == "String" {
        return Kind::Terminal {
            name,
            display: "string".to_owned(),
        };
    }
    if decl.is_type() && !is_external(href) {
        return Kind::Reference { name };
    }
    Kind::Terminal {
        display: name.clone(),
        name,
    }
}

fn primitive_display(name: &str) -> String {
    match name {
        "unit" => "null".to_owned(),
        "bool" => "boolean".to_owned(),
        "str" | "char" => "string".to_owned(),
        "u32" | "u64" | "u128" => uint_link(name),
        "u8" | "u16" | "usize" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "f32"
        | "f64" => "number".to_owned(),
        other => other.to_owned(),
    }
}

/// `u64` → `[Uint64](#type-uint64)`.
fn uint_link(primitive: &str) -> String {
    type_link(&format!("Uint{}", primitive.trim_start_matches('u')))
}

/// Text of a Markdown link, or the display itself when it is not a link.
fn link_text(display: &str) -> &str {
    display
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .map_or(display, |(text, _)| text)
        .trim_matches('`')
}

/// Resolved type of one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeExpression {
    name: String,
    display: Option<String>,
    children: Vec<TypeExpression>,
    shape: Option<Shape>,
    /// Open angle brackets of this node's own argument list.
    open: u32,
    /// Open angle brackets of arguments being skipped.
    skip: u32,
    /// A `(` was seen while the next argument was still empty.
    paren: bool,
}

impl TypeExpression {
    fn terminal(name: &str, display: String) -> Self {
        Self {
            name: name.to_owned(),
            display: Some(display),
            ..Self::default()
        }
    }

    /// Expression with a fixed display string.
    #[must_use]
    pub fn fixed(display: &str) -> Self {
        Self::terminal(display, display.to_owned())
    }

    /// Item name of the first anchor (`Option`, `H256`, ...).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved display string, once complete.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Display string, or `unknown` for an unresolved slot.
    #[must_use]
    pub fn render(&self) -> &str {
        self.display().unwrap_or(UNKNOWN)
    }

    /// Type arguments of a container.
    #[must_use]
    pub fn children(&self) -> &[TypeExpression] {
        &self.children
    }

    /// Container shape, if any.
    #[must_use]
    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    /// Whether the display string is set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.display.is_some()
    }

    fn is_started(&self) -> bool {
        !self.name.is_empty()
    }

    fn set_kind(&mut self, href: &str, ctx: &mut ResolutionContext) {
        match classify(href) {
            Kind::Terminal { name, display } => {
                self.name = name;
                self.display = Some(display);
            }
            Kind::Reference { name } => {
                ctx.enqueue_link(href);
                self.display = Some(type_link(&name));
                self.name = name;
            }
            Kind::Container { name, shape } => {
                self.name = name;
                self.shape = Some(shape);
                self.children = vec![Self::default(); shape.arity()];
            }
        }
    }

    /// Route an anchor to the first incomplete child.
    fn anchor(&mut self, href: &str, ctx: &mut ResolutionContext) {
        if self.skip == 0 {
            match self.children.iter_mut().find(|child| !child.is_complete()) {
                Some(child) if !child.is_started() => {
                    child.set_kind(href, ctx);
                    return;
                }
                Some(child) => {
                    child.anchor(href, ctx);
                    return;
                }
                None => {}
            }
        }
        let argument = declaration(href).map_or(UNKNOWN, |decl| decl.name);
        ctx.report(DiagnosticKind::ExtraTypeArgument {
            container: self.name.clone(),
            argument: argument.to_owned(),
        });
    }

    /// Feed one character of text. Returns `true` when it closes this node.
    fn push_char(&mut self, c: char, ctx: &mut ResolutionContext) -> bool {
        if self.skip > 0 {
            match c {
                '<' => self.skip += 1,
                '>' => self.skip -= 1,
                _ => {}
            }
            return false;
        }

        let active = self.children.iter_mut().find(|child| !child.is_complete());
        match active {
            Some(child) if child.is_started() => {
                child.push_char(c, ctx);
                return false;
            }
            Some(child) => match c {
                '(' => self.paren = true,
                ')' if self.paren => {
                    *child = Self::terminal("()", "null".to_owned());
                    self.paren = false;
                }
                '<' if self.open == 0 => self.open = 1,
                '<' => self.skip += 1,
                '>' => return self.close_bracket(ctx),
                _ => {}
            },
            None => match c {
                '<' if self.open == 0 => self.open = 1,
                // Arguments of a terminal argument.
                '<' => self.skip += 1,
                '>' => return self.close_bracket(ctx),
                _ => {}
            },
        }
        false
    }

    fn close_bracket(&mut self, ctx: &mut ResolutionContext) -> bool {
        if self.open == 0 {
            return false;
        }
        self.open -= 1;
        if self.open == 0 {
            self.close(ctx);
            return true;
        }
        false
    }

    /// Fill missing arguments and synthesize the display string.
    fn close(&mut self, ctx: &mut ResolutionContext) {
        for child in &mut self.children {
            if child.is_complete() {
                continue;
            }
            if child.is_started() {
                ctx.report(DiagnosticKind::UnclosedType {
                    container: child.name.clone(),
                });
                child.close(ctx);
            } else {
                ctx.report(DiagnosticKind::MissingTypeArgument {
                    container: self.name.clone(),
                });
                *child = Self::terminal(UNKNOWN, UNKNOWN.to_owned());
            }
        }
        let display = self.synthesize(ctx);
        self.display = Some(display);
    }

    fn synthesize(&self, ctx: &mut ResolutionContext) -> String {
        let arg = |index: usize| self.children.get(index).map_or(UNKNOWN, Self::render);
        match self.shape {
            Some(Shape::Optional) => format!("{} | null", arg(0)),
            Some(Shape::Sequence) => format!("Array<{}>", arg(0)),
            Some(Shape::Map) => format!("{{ key: {} ⇒ {} }}", arg(0), arg(1)),
            Some(Shape::TaggedUnion) => {
                let base = link_text(arg(1));
                let serialized = format!("{SERIALIZED_PREFIX}{base}");
                ctx.record_serialized(&serialized, base);
                format!("{} | {}", arg(0), type_link(&serialized))
            }
            Some(Shape::Paginated) => format!("Paginated<{}>", arg(0)),
            Some(Shape::Transparent) => arg(0).to_owned(),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

/// A named, typed slot: a parameter, the return value or a struct field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Cleaned slot name.
    pub name: String,
    /// Resolved type.
    pub ty: TypeExpression,
}

impl Slot {
    /// Whether this is the return slot of a signature.
    #[must_use]
    pub fn is_return(&self) -> bool {
        self.name.contains(FUNCTION_ARROW)
    }
}

/// Outcome of feeding one event to a [`TypeResolver`].
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// The event was consumed and more input is needed.
    Pending,
    /// The slot is complete. Carries the part of the event it did not consume.
    Complete(Option<TagEvent>),
}

impl Step {
    fn rest(text: &str) -> Self {
        Self::Complete((!text.is_empty()).then(|| TagEvent::text(text)))
    }
}

/// State machine reading one slot.
#[derive(Debug, Default)]
pub struct TypeResolver {
    raw_name: String,
    root: TypeExpression,
    in_anchor: bool,
    /// Open angle brackets after a terminal root.
    extra: u32,
}

impl TypeResolver {
    /// Create a resolver for the next slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text seen before the first anchor.
    #[must_use]
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Whether the first anchor was seen.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.root.is_started()
    }

    fn is_settled(&self) -> bool {
        self.root.is_complete() && !self.in_anchor && self.extra == 0
    }

    /// Consume one event.
    pub fn advance(&mut self, event: &TagEvent, ctx: &mut ResolutionContext) -> Step {
        match event {
            TagEvent::Start { name, .. } if name == "a" => self.anchor_start(event, ctx),
            TagEvent::End { name } if name == "a" => {
                self.in_anchor = false;
                Step::Pending
            }
            TagEvent::Text(text) => self.text(text, ctx),
            _ if self.is_settled() => Step::Complete(Some(event.clone())),
            _ => Step::Pending,
        }
    }

    /// Finish the slot, closing anything left open.
    pub fn finish(mut self, ctx: &mut ResolutionContext) -> Slot {
        let mut name = clean_name(&self.raw_name);
        if self.root.is_started() && !self.root.is_complete() {
            ctx.report(DiagnosticKind::UnclosedType {
                container: self.root.name.clone(),
            });
            self.root.close(ctx);
        } else if !self.root.is_started()
            && let Some(prefix) = name.strip_suffix("()")
        {
            // `-> ()` is plain text in rustdoc output.
            name = prefix.trim_end().trim_end_matches(':').trim_end().to_owned();
            self.root = TypeExpression::terminal("()", "null".to_owned());
        }
        Slot {
            name,
            ty: self.root,
        }
    }

    fn anchor_start(&mut self, event: &TagEvent, ctx: &mut ResolutionContext) -> Step {
        let href = event.attr("href").unwrap_or_default();
        if !self.root.is_started() {
            self.in_anchor = true;
            self.root.set_kind(href, ctx);
            return Step::Pending;
        }
        if self.root.is_complete() {
            if self.extra == 0 {
                return Step::Complete(Some(event.clone()));
            }
            let argument = declaration(href).map_or(UNKNOWN, |decl| decl.name);
            ctx.report(DiagnosticKind::ExtraTypeArgument {
                container: self.root.name.clone(),
                argument: argument.to_owned(),
            });
            self.in_anchor = true;
            return Step::Pending;
        }
        self.in_anchor = true;
        self.root.anchor(href, ctx);
        Step::Pending
    }

    fn text(&mut self, text: &str, ctx: &mut ResolutionContext) -> Step {
        if self.in_anchor {
            return Step::Pending;
        }
        if !self.root.is_started() {
            self.raw_name.push_str(text);
            return self.numeric_suffix();
        }
        if self.root.is_complete() {
            return self.trailing_text(text);
        }
        for (index, c) in text.char_indices() {
            if self.root.push_char(c, ctx) {
                return Step::rest(&text[index + c.len_utf8()..]);
            }
        }
        Step::Pending
    }

    /// Resolve `name: u64` written without a link.
    fn numeric_suffix(&mut self) -> Step {
        let Some(caps) = NUMERIC_SUFFIX.captures(&self.raw_name) else {
            return Step::Pending;
        };
        let ty = &caps["ty"];
        let root = TypeExpression::terminal(ty, uint_link(ty));
        let name = caps["name"].to_owned();
        let rest = self.raw_name[caps.get(0).map_or(0, |m| m.end())..].to_owned();
        self.root = root;
        self.raw_name = name;
        Step::rest(&rest)
    }

    /// Text after a terminal root: either generic arguments the terminal
    /// cannot take, or the start of the next slot.
    fn trailing_text(&mut self, text: &str) -> Step {
        if self.extra == 0 && !text.trim_start().starts_with('<') {
            return Step::Complete(Some(TagEvent::text(text)));
        }
        for (index, c) in text.char_indices() {
            match c {
                '<' => self.extra += 1,
                '>' => {
                    self.extra = self.extra.saturating_sub(1);
                    if self.extra == 0 {
                        return Step::rest(&text[index + 1..]);
                    }
                }
                _ => {}
            }
        }
        Step::Pending
    }
}

/// Strip the receiver, separators, `pub` and the trailing colon.
fn clean_name(raw: &str) -> String {
    let mut name = raw.trim().trim_start_matches('(').trim_start();
    for receiver in RECEIVERS {
        if let Some(rest) = name.strip_prefix(receiver)
            && (rest.is_empty() || rest.starts_with([',', ')']))
        {
            name = rest;
            break;
        }
    }
    let name = name.trim_start_matches([',', ' ', '\n', '\u{a0}']).trim();
    let name = name.strip_prefix("pub ").unwrap_or(name);
    name.trim_end_matches(':').trim().to_owned()
}

/// Splits a signature span into consecutive slots.
#[derive(Debug, Default)]
pub struct SlotReader {
    current: TypeResolver,
    slots: Vec<Slot>,
}

impl SlotReader {
    /// Create an empty reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one event, starting a new slot whenever one completes.
    pub fn advance(&mut self, event: &TagEvent, ctx: &mut ResolutionContext) {
        let mut next = Some(event.clone());
        while let Some(event) = next.take() {
            if let Step::Complete(rest) = self.current.advance(&event, ctx) {
                let done = std::mem::take(&mut self.current);
                self.slots.push(done.finish(ctx));
                next = rest;
            }
        }
    }

    /// Slots completed so far.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Finish the slot in progress and return all slots.
    ///
    /// Trailing text without a type (a closing parenthesis) is dropped; a
    /// named slot without a type is reported.
    pub fn finish(mut self, ctx: &mut ResolutionContext) -> Vec<Slot> {
        let raw = self.current.raw_name().to_owned();
        let started = self.current.is_started();
        let slot = self.current.finish(ctx);
        if started || slot.ty.is_complete() {
            self.slots.push(slot);
        } else if raw.contains(':') || raw.contains(FUNCTION_ARROW) {
            ctx.report(DiagnosticKind::UnresolvedSlot {
                slot: slot.name.clone(),
            });
            self.slots.push(slot);
        }
        self.slots
    }
}
