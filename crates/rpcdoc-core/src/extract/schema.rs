//! Type pages: structs, enums and type aliases.

use std::collections::HashSet;

use crate::consts::{FIELD_ID_PREFIX, TYPE_TITLE_LEVEL, VARIANT_ID_PREFIX};
use crate::context::{DiagnosticKind, ResolutionContext};
use crate::document::{Member, SchemaKind, TypeSchema};
use crate::event::TagEvent;
use crate::extract::depth_delta;
use crate::extract::member::{MemberPage, RawMember};
use crate::link::declaration;
use crate::type_expr::{SlotReader, TypeExpression};

/// Per-run options for schema extraction.
#[derive(Clone, Debug, Default)]
pub struct SchemaOptions {
    /// Enums rendered as a type/description table.
    pub tagged_enums: Vec<String>,
}

impl SchemaOptions {
    fn is_tagged(&self, name: &str) -> bool {
        self.tagged_enums.iter().any(|tagged| tagged == name)
    }
}

/// Extract the schema documented on `page`.
///
/// Returns `None` and records a diagnostic when the page is not a struct,
/// enum, union or type alias page.
pub fn extract_schema(
    page: &str,
    events: &[TagEvent],
    options: &SchemaOptions,
    ctx: &mut ResolutionContext,
) -> Option<TypeSchema> {
    let Some(decl) = declaration(page) else {
        ctx.report(DiagnosticKind::UnsupportedPage);
        return None;
    };
    let name = decl.name.to_owned();
    let schema = match decl.kind {
        "struct" | "union" => {
            let (doc, fields) = read_members(events, FIELD_ID_PREFIX, ctx);
            TypeSchema {
                name,
                doc,
                kind: SchemaKind::Struct {
                    fields: fields.into_iter().map(into_member).collect(),
                },
            }
        }
        "enum" => {
            let (doc, variants) = read_members(events, VARIANT_ID_PREFIX, ctx);
            let mut seen = HashSet::new();
            let variants = variants
                .into_iter()
                .filter(|variant| {
                    let first = seen.insert(variant.name.clone());
                    if !first {
                        tracing::debug!(variant = %variant.name, "Skipping duplicate variant");
                    }
                    first
                })
                .map(into_member)
                .collect();
            let tagged = options.is_tagged(&name);
            TypeSchema {
                name,
                doc,
                kind: SchemaKind::Enum { variants, tagged },
            }
        }
        "type" => {
            let (doc, _) = read_members(events, FIELD_ID_PREFIX, ctx);
            let target = alias_target(events, ctx);
            TypeSchema {
                name,
                doc,
                kind: SchemaKind::Alias { target },
            }
        }
        _ => {
            ctx.report(DiagnosticKind::UnsupportedPage);
            return None;
        }
    };
    Some(schema)
}

fn read_members(
    events: &[TagEvent],
    prefix: &'static str,
    ctx: &mut ResolutionContext,
) -> (crate::markdown::Prose, Vec<RawMember>) {
    let mut page = MemberPage::new(prefix, TYPE_TITLE_LEVEL);
    for event in events {
        page.advance(event, ctx);
    }
    page.finish(ctx)
}

fn into_member(raw: RawMember) -> Member {
    Member {
        name: raw.name,
        ty: raw.ty,
        doc: raw.doc,
    }
}

/// Aliased type: the expression after `=` in the first declaration block.
fn alias_target(events: &[TagEvent], ctx: &mut ResolutionContext) -> TypeExpression {
    let mut depth: Option<i32> = None;
    let mut after_eq = false;
    let mut plain = String::new();
    let mut reader = SlotReader::new();

    for event in events {
        let Some(current) = depth.as_mut() else {
            if is_declaration(event) {
                depth = Some(0);
            }
            continue;
        };
        *current += depth_delta(event);
        if *current < 0 {
            break;
        }
        if after_eq {
            if let TagEvent::Text(text) = event {
                plain.push_str(text);
            }
            reader.advance(event, ctx);
        } else if let TagEvent::Text(text) = event
            && let Some((_, rest)) = text.split_once('=')
        {
            after_eq = true;
            plain.push_str(rest);
            reader.advance(&TagEvent::text(rest), ctx);
        }
    }

    reader
        .finish(ctx)
        .into_iter()
        .map(|slot| slot.ty)
        .find(TypeExpression::is_complete)
        .unwrap_or_else(|| {
            let plain = plain.trim().trim_end_matches(';').trim();
            if plain.is_empty() {
                ctx.report(DiagnosticKind::UnresolvedSlot {
                    slot: "type alias".to_owned(),
                });
            }
            TypeExpression::fixed(if plain.is_empty() { "unknown" } else { plain })
        })
}

fn is_declaration(event: &TagEvent) -> bool {
    (event.is_start_of("pre") || event.is_start_of("div"))
        && (event.class_contains("typedef") || event.class_contains("item-decl"))
}
