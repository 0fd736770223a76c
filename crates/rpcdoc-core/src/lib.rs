//! JSON-RPC reference generation from rustdoc HTML.
//!
//! This crate provides:
//! - [`tokenize`]: lenient tag/text event stream over rustdoc pages
//! - [`MarkdownSpan`]: documentation prose to Markdown
//! - [`TypeResolver`]: signature types to readable type expressions
//! - [`extract`]: state machines for module, error and type pages
//! - [`Generator`]: worklist-driven assembly of the reference [`Document`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use rpcdoc_core::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     doc_root: PathBuf::from("target/doc"),
//!     ..GeneratorConfig::default()
//! };
//! let report = Generator::new(config).generate()?;
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! report.document.write_to(&mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

mod consts;
mod context;
mod document;
mod entities;
mod error;
mod event;
pub mod extract;
mod generator;
mod link;
mod markdown;
mod type_expr;

pub use consts::{
    DEFAULT_DOC_ROOT, DEFAULT_ERROR_PAGE, DEFAULT_MODULE_PATTERN, MAX_REDIRECTS, PREAMBLE,
};
pub use context::{Diagnostic, DiagnosticKind, ResolutionContext};
pub use document::{
    Document, ErrorCatalog, ErrorVariant, Member, MethodEntry, ModuleEntry, Param, SchemaKind,
    TypeSchema,
};
pub use error::{GenerateError, PageError};
pub use event::{TagEvent, redirect_target, tokenize};
pub use generator::{
    GenerationReport, Generator, GeneratorConfig, ScalarType, default_extra_types,
    default_scalars, default_skip_names,
};
pub use link::{resolve_page, rewrite_link};
pub use markdown::{MarkdownSpan, Prose};
pub use type_expr::{Shape, Slot, SlotReader, Step, TypeExpression, TypeResolver};
