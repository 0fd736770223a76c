//! Tag/text event stream over rustdoc HTML.
//!
//! Rustdoc output is HTML, not XML, so the reader runs in a lenient mode:
//! end names are not checked, unmatched end tags are tolerated and void
//! elements never produce an end event. Everything downstream consumes the
//! resulting flat [`TagEvent`] sequence exactly once, in order.

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;

use crate::entities::{convert_html_entities, decode_reference};
use crate::error::PageError;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Script and style bodies are not markup and confuse the XML reader.
static RAW_TEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("invalid raw text regex")
});

/// Returns `true` for elements that never open a nesting level.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// One markup event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagEvent {
    /// Opening tag with attributes in source order.
    Start {
        /// Lowercased tag name.
        name: String,
        /// Lowercased attribute names with decoded values.
        attrs: Vec<(String, String)>,
    },
    /// Closing tag.
    End {
        /// Lowercased tag name.
        name: String,
    },
    /// Character data with entities decoded.
    Text(String),
}

impl TagEvent {
    /// Build a start event.
    #[must_use]
    pub fn start(name: &str, attrs: &[(&str, &str)]) -> Self {
        Self::Start {
            name: name.to_owned(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    /// Build an end event.
    #[must_use]
    pub fn end(name: &str) -> Self {
        Self::End {
            name: name.to_owned(),
        }
    }

    /// Build a text event.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Attribute value of a start event.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Self::Start { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// `id` attribute of a start event.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether the start event carries `class` among its classes.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Whether any class of the start event contains `fragment`.
    #[must_use]
    pub fn class_contains(&self, fragment: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.contains(fragment))
    }

    /// Whether this is a start event for `tag`.
    #[must_use]
    pub fn is_start_of(&self, tag: &str) -> bool {
        matches!(self, Self::Start { name, .. } if name == tag)
    }

    /// Whether this is an end event for `tag`.
    #[must_use]
    pub fn is_end_of(&self, tag: &str) -> bool {
        matches!(self, Self::End { name } if name == tag)
    }
}

/// Tokenize an HTML page into events.
///
/// # Errors
///
/// Returns an error if the reader hits markup it cannot recover from.
pub fn tokenize(html: &str) -> Result<Vec<TagEvent>, PageError> {
    let html = RAW_TEXT_PATTERN.replace_all(html, "");
    let html = convert_html_entities(&html);

    let mut reader = Reader::from_str(&html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut buffer = EventBuffer::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let (name, attrs) = decode_start(&reader, &e);
                buffer.push_start(name, attrs, false);
            }
            Event::Empty(e) => {
                let (name, attrs) = decode_start(&reader, &e);
                buffer.push_start(name, attrs, true);
            }
            Event::End(e) => {
                buffer.push_end(decode_name(&reader, e.name().as_ref()));
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                buffer.push_text(&text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                buffer.push_text(&decode_reference(&entity));
            }
            Event::CData(e) => {
                buffer.push_text(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    Ok(buffer.finish())
}

/// Target of a `<meta http-equiv="refresh">` redirect stub, if any.
#[must_use]
pub fn redirect_target(events: &[TagEvent]) -> Option<&str> {
    events.iter().find_map(|event| {
        if !event.is_start_of("meta") {
            return None;
        }
        if !event.attr("http-equiv")?.eq_ignore_ascii_case("refresh") {
            return None;
        }
        // content="0;URL=../../crate/struct.Name.html"
        let (_, url) = event.attr("content")?.split_once(';')?;
        let (key, target) = url.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("url")
            .then(|| target.trim().trim_matches(['\'', '"']))
            .filter(|target| !target.is_empty())
    })
}

/// Accumulates events, merging adjacent text fragments.
#[derive(Default)]
struct EventBuffer {
    events: Vec<TagEvent>,
    text: String,
}

impl EventBuffer {
    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn push_start(&mut self, name: String, attrs: Vec<(String, String)>, self_closing: bool) {
        self.flush_text();
        let close = self_closing && !is_void_element(&name);
        let end_name = close.then(|| name.clone());
        self.events.push(TagEvent::Start { name, attrs });
        if let Some(name) = end_name {
            self.events.push(TagEvent::End { name });
        }
    }

    fn push_end(&mut self, name: String) {
        self.flush_text();
        if !is_void_element(&name) {
            self.events.push(TagEvent::End { name });
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.events
                .push(TagEvent::Text(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<TagEvent> {
        self.flush_text();
        self.events
    }
}

fn decode_start(reader: &Reader<&[u8]>, e: &BytesStart) -> (String, Vec<(String, String)>) {
    let name = decode_name(reader, e.name().as_ref());
    // Malformed attributes are dropped, the rest of the tag is kept.
    let attrs = e
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = decode_name(reader, attr.key.as_ref());
            let value = attr
                .unescape_value()
                .map_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned(), Cow::into_owned);
            (key, value)
        })
        .collect();
    (name, attrs)
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .map_or_else(|_| String::from_utf8_lossy(name).into_owned(), Cow::into_owned)
        .to_ascii_lowercase()
}
