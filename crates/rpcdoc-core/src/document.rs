//! Document model and Markdown rendering.

use std::fmt::Write as _;
use std::io;

use crate::consts::{
    MEMBER_INDENT, MEMBER_TITLE_LEVEL, METHOD_TITLE_LEVEL, MODULE_TITLE_LEVEL, TYPE_TITLE_LEVEL,
};
use crate::link::{error_anchor, method_anchor, module_anchor, type_anchor};
use crate::markdown::Prose;
use crate::type_expr::TypeExpression;

/// A method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeExpression,
}

/// One RPC method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodEntry {
    /// Method name.
    pub name: String,
    /// Parameters in declaration order, without the receiver.
    pub params: Vec<Param>,
    /// Return type; `None` when the signature has no return slot.
    pub result: Option<TypeExpression>,
    /// Method documentation.
    pub doc: Prose,
    /// Deprecation note, for deprecated methods.
    pub deprecation: Option<Prose>,
}

impl MethodEntry {
    /// Whether the method is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// One RPC module: a trait page and its required methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Module name (`Chain` for `ChainRpc`).
    pub name: String,
    /// Module documentation.
    pub doc: Prose,
    /// Methods in page order.
    pub methods: Vec<MethodEntry>,
}

/// One variant of the RPC error enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorVariant {
    /// Variant name.
    pub name: String,
    /// Numeric error code, when the page shows the discriminant.
    pub code: Option<String>,
    /// Variant documentation.
    pub doc: Prose,
}

/// The RPC error enum.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorCatalog {
    /// Enum documentation.
    pub doc: Prose,
    /// Variants in page order.
    pub variants: Vec<ErrorVariant>,
}

/// A struct field or enum variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// Field or variant name.
    pub name: String,
    /// Field type, or the payload of a tuple variant.
    pub ty: Option<TypeExpression>,
    /// Member documentation.
    pub doc: Prose,
}

/// What a documented type is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    /// Scalar with a fixed description.
    Scalar,
    /// Enum; `tagged` enums render their variants as a table.
    Enum {
        /// Variants, unique by name.
        variants: Vec<Member>,
        /// Render as a type/description table.
        tagged: bool,
    },
    /// Struct, documented as a JSON object.
    Struct {
        /// Fields in page order.
        fields: Vec<Member>,
    },
    /// Type alias.
    Alias {
        /// Aliased type.
        target: TypeExpression,
    },
    /// Serialized form of another type.
    Serialized {
        /// Name of the serialized type.
        base: String,
    },
}

/// A documented type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSchema {
    /// Type name.
    pub name: String,
    /// Type documentation.
    pub doc: Prose,
    /// Type shape.
    pub kind: SchemaKind,
}

/// The assembled reference document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Markdown written before the table of contents.
    pub preamble: String,
    /// Modules in page order.
    pub modules: Vec<ModuleEntry>,
    /// Error enum.
    pub errors: ErrorCatalog,
    /// Types sorted by name.
    pub types: Vec<TypeSchema>,
}

impl Document {
    /// Number of methods across all modules.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.modules.iter().map(|module| module.methods.len()).sum()
    }

    /// Render the document as Markdown.
    #[must_use]
    pub fn render(&self) -> String {
        let mut blocks = Blocks::default();
        blocks.push(self.preamble.trim());
        blocks.push("## Table of Contents");
        blocks.push(self.table_of_contents());

        blocks.push("## RPC Methods");
        for module in &self.modules {
            render_module(&mut blocks, module);
        }

        blocks.push("## RPC Errors");
        blocks.push(self.errors.doc.as_str());
        for variant in &self.errors.variants {
            blocks.push(heading(TYPE_TITLE_LEVEL, &format!("Error `{}`", variant.name)));
            if let Some(code) = &variant.code {
                blocks.push(format!("Code: `{code}`"));
            }
            blocks.push(variant.doc.as_str());
        }

        blocks.push("## RPC Types");
        for schema in &self.types {
            render_type(&mut blocks, schema);
        }

        blocks.finish()
    }

    /// Write the rendered document.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to(&self, writer: &mut impl io::Write) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }

    fn table_of_contents(&self) -> String {
        let mut toc = String::new();
        let _ = writeln!(toc, "* [RPC Methods](#rpc-methods)");
        for module in &self.modules {
            let _ = writeln!(
                toc,
                "    * [Module {}]({})",
                module.name,
                module_anchor(&module.name)
            );
            for method in &module.methods {
                let _ = writeln!(
                    toc,
                    "        * [Method `{}`]({})",
                    method.name,
                    method_anchor(&method.name)
                );
            }
        }
        let _ = writeln!(toc, "* [RPC Errors](#rpc-errors)");
        for variant in &self.errors.variants {
            let _ = writeln!(
                toc,
                "    * [Error `{}`]({})",
                variant.name,
                error_anchor(&variant.name)
            );
        }
        let _ = writeln!(toc, "* [RPC Types](#rpc-types)");
        for schema in &self.types {
            let _ = writeln!(
                toc,
                "    * [Type `{}`]({})",
                schema.name,
                type_anchor(&schema.name)
            );
        }
        toc
    }
}

/// Markdown blocks separated by blank lines.
#[derive(Default)]
struct Blocks(Vec<String>);

impl Blocks {
    fn push(&mut self, block: impl AsRef<str>) {
        let block = block.as_ref().trim_end();
        if !block.trim().is_empty() {
            self.0.push(block.to_owned());
        }
    }

    fn finish(self) -> String {
        let mut out = self.0.join("\n\n");
        out.push('\n');
        out
    }
}

fn heading(level: usize, text: &str) -> String {
    format!("{} {text}", "#".repeat(level))
}

fn render_module(blocks: &mut Blocks, module: &ModuleEntry) {
    blocks.push(heading(MODULE_TITLE_LEVEL, &format!("Module {}", module.name)));
    blocks.push(module.doc.as_str());
    for method in &module.methods {
        blocks.push(heading(
            METHOD_TITLE_LEVEL,
            &format!("Method `{}`", method.name),
        ));
        blocks.push(method_summary(method));
        if let Some(note) = &method.deprecation {
            blocks.push(deprecation_quote(note));
        }
        blocks.push(method.doc.as_str());
    }
}

fn method_summary(method: &MethodEntry) -> String {
    let names: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
    let mut summary = format!("* {}({})\n", method.name, names.join(", "));
    for param in &method.params {
        let _ = writeln!(summary, "    * {}: {}", param.name, param.ty);
    }
    let result = method.result.as_ref().map_or("null", TypeExpression::render);
    let _ = write!(summary, "* result: {result}");
    summary
}

fn deprecation_quote(note: &Prose) -> String {
    if note.is_empty() {
        return "> Deprecated".to_owned();
    }
    note.as_str()
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_owned()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_type(blocks: &mut Blocks, schema: &TypeSchema) {
    blocks.push(heading(TYPE_TITLE_LEVEL, &format!("Type `{}`", schema.name)));
    if let SchemaKind::Alias { target } = &schema.kind {
        blocks.push(format!("`{}` is an alias of {target}.", schema.name));
    }
    blocks.push(schema.doc.as_str());

    match &schema.kind {
        SchemaKind::Struct { fields } if !fields.is_empty() => {
            blocks.push(heading(MEMBER_TITLE_LEVEL, "Fields"));
            blocks.push(format!(
                "`{}` is a JSON object with the following fields.",
                schema.name
            ));
            for field in fields {
                render_member(blocks, field);
            }
        }
        SchemaKind::Enum { variants, tagged } if !variants.is_empty() => {
            blocks.push(heading(MEMBER_TITLE_LEVEL, "Variants"));
            if *tagged {
                blocks.push(variant_table(variants));
            } else {
                for variant in variants {
                    render_member(blocks, variant);
                }
            }
        }
        _ => {}
    }
}

fn render_member(blocks: &mut Blocks, member: &Member) {
    match &member.ty {
        Some(ty) => blocks.push(format!("*   `{}`: {ty}", member.name)),
        None => blocks.push(format!("*   `{}`", member.name)),
    }
    blocks.push(indent(member.doc.as_str(), MEMBER_INDENT));
}

fn variant_table(variants: &[Member]) -> String {
    let mut table = String::from("| Type | Description |\n| --- | --- |");
    for variant in variants {
        let description = variant.doc.summary().replace('|', "\\|");
        let _ = write!(table, "\n| `{}` | {description} |", variant.name);
    }
    table
}

/// Prefix every non-empty line with `width` spaces.
fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
