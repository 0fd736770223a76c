//! Page extractors.
//!
//! Each extractor is a state machine fed one [`TagEvent`] at a time. Item
//! extractors (methods, fields, variants) report [`Progress::Yield`] when an
//! event belongs to the next item, so the page extractor owning them can
//! dispatch it again.

mod error_catalog;
mod member;
mod method;
mod module;
mod schema;

pub use error_catalog::extract_error_catalog;
pub use method::MethodExtractor;
pub use module::{extract_module, module_name};
pub use schema::{SchemaOptions, extract_schema};

use crate::event::{TagEvent, is_void_element};

/// Outcome of feeding one event to an item extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The event was consumed and the item needs more input.
    Pending,
    /// The event was consumed and completed the item.
    Complete,
    /// The item is complete and the event was not consumed.
    Yield,
}

/// Change in nesting depth caused by an event.
pub(crate) fn depth_delta(event: &TagEvent) -> i32 {
    match event {
        TagEvent::Start { name, .. } if !is_void_element(name) => 1,
        TagEvent::End { name } if !is_void_element(name) => -1,
        _ => 0,
    }
}

/// A prose block, as opposed to a declaration block that also carries the
/// `docblock` class in some rustdoc versions.
pub(crate) fn is_docblock(event: &TagEvent) -> bool {
    event.is_start_of("div") && event.has_class("docblock") && !event.class_contains("decl")
}

/// Stability or deprecation notice following a signature.
pub(crate) fn is_stability(event: &TagEvent) -> bool {
    (event.is_start_of("div") || event.is_start_of("span"))
        && (event.has_class("stability") || event.has_class("item-info"))
}

/// Anchors inside signatures that are not part of any type: self links,
/// heading anchors and source links.
pub(crate) fn is_skipped_anchor(event: &TagEvent) -> bool {
    if !event.is_start_of("a") {
        return false;
    }
    let href = event.attr("href").unwrap_or_default();
    href.is_empty()
        || href.starts_with('#')
        || href.contains("/src/")
        || event.class_contains("src")
}

/// Start of a section such as "Implementors" that ends the item list.
pub(crate) fn is_section_heading(event: &TagEvent) -> bool {
    event.is_start_of("h2")
}

/// Name of a top-level item whose heading `id` is `prefix` + name.
///
/// Nested ids such as `variant.Foo.field.bar` are not items.
pub(crate) fn item_id<'a>(event: &'a TagEvent, prefix: &str) -> Option<&'a str> {
    if !matches!(event, TagEvent::Start { .. }) {
        return None;
    }
    event
        .id()?
        .strip_prefix(prefix)
        .filter(|name| !name.is_empty() && !name.contains('.'))
}
