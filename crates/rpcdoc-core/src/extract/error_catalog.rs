//! The RPC error enum page.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::consts::{TYPE_TITLE_LEVEL, VARIANT_ID_PREFIX};
use crate::context::ResolutionContext;
use crate::document::{ErrorCatalog, ErrorVariant};
use crate::event::TagEvent;
use crate::extract::depth_delta;
use crate::extract::member::MemberPage;

/// `Name = -1` in the enum declaration.
static DISCRIMINANT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(-?\d+)")
        .expect("invalid discriminant regex")
});

/// Collects the text of the item declaration block.
#[derive(Debug, Default)]
struct Declaration {
    depth: Option<i32>,
    text: String,
    done: bool,
}

impl Declaration {
    fn advance(&mut self, event: &TagEvent) {
        if self.done {
            return;
        }
        match self.depth.as_mut() {
            None => {
                if event.is_start_of("pre")
                    && (event.class_contains("item-decl") || event.has_class("enum"))
                {
                    self.depth = Some(0);
                }
            }
            Some(depth) => {
                *depth += depth_delta(event);
                if *depth < 0 {
                    self.done = true;
                } else if let TagEvent::Text(text) = event {
                    self.text.push_str(text);
                }
            }
        }
    }

    fn discriminants(&self) -> HashMap<&str, &str> {
        DISCRIMINANT_PATTERN
            .captures_iter(&self.text)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let code = caps.get(2)?.as_str();
                Some((name, code))
            })
            .collect()
    }
}

/// Error code shown in a variant heading such as `Invalid = -1`.
fn heading_code(signature: &str) -> Option<String> {
    let (_, code) = signature.split_once('=')?;
    let code = code.trim().trim_end_matches(',').trim();
    (!code.is_empty()).then(|| code.to_owned())
}

/// Extract the error catalog from the events of the error enum page.
pub fn extract_error_catalog(events: &[TagEvent], ctx: &mut ResolutionContext) -> ErrorCatalog {
    let mut declaration = Declaration::default();
    let mut page = MemberPage::new(VARIANT_ID_PREFIX, TYPE_TITLE_LEVEL);
    for event in events {
        declaration.advance(event);
        page.advance(event, ctx);
    }
    let (doc, members) = page.finish(ctx);
    let discriminants = declaration.discriminants();

    let mut seen = HashSet::new();
    let variants = members
        .into_iter()
        .filter(|member| seen.insert(member.name.clone()))
        .map(|member| {
            let code = heading_code(&member.signature).or_else(|| {
                discriminants
                    .get(member.name.as_str())
                    .map(|code| (*code).to_owned())
            });
            ErrorVariant {
                name: member.name,
                code,
                doc: member.doc,
            }
        })
        .collect();

    ErrorCatalog { doc, variants }
}
