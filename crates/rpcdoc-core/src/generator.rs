//! Reference generation over a rustdoc output tree.
//!
//! [`Generator`] reads the module trait pages and the error enum page, then
//! drains the type worklist those pages fill, and assembles a [`Document`].
//!
//! # Example
//!
//! ```no_run
//! use rpcdoc_core::{Generator, GeneratorConfig};
//!
//! let report = Generator::new(GeneratorConfig::default()).generate()?;
//! println!("{}", report.document.render());
//! # Ok::<(), rpcdoc_core::GenerateError>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::consts::{
    DEFAULT_DOC_ROOT, DEFAULT_ERROR_PAGE, DEFAULT_MODULE_PATTERN, MAX_REDIRECTS, PREAMBLE,
    serialized_description,
};
use crate::context::{Diagnostic, DiagnosticKind, ResolutionContext};
use crate::document::{Document, ErrorCatalog, ModuleEntry, SchemaKind, TypeSchema};
use crate::error::{GenerateError, PageError};
use crate::event::{TagEvent, redirect_target, tokenize};
use crate::extract::{
    SchemaOptions, extract_error_catalog, extract_module, extract_schema, module_name,
};
use crate::link::{declaration, resolve_page};
use crate::markdown::Prose;

/// A type documented with a fixed description instead of a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarType {
    /// Type name.
    pub name: String,
    /// Markdown description.
    pub description: String,
}

impl ScalarType {
    /// Create a scalar type.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Inputs of a generation run.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Directory holding the rustdoc output.
    pub doc_root: PathBuf,
    /// Glob of module trait pages, relative to `doc_root`.
    pub module_pattern: String,
    /// Error enum page, relative to `doc_root`.
    pub error_page: String,
    /// Markdown written before the table of contents.
    pub preamble: Option<String>,
    /// Type pages documented even when no signature links to them.
    pub extra_types: Vec<String>,
    /// Type names never documented.
    pub skip_names: Vec<String>,
    /// Pages whose path contains any of these fragments are never documented.
    pub skip_paths: Vec<String>,
    /// Enums rendered as a type/description table.
    pub tagged_enums: Vec<String>,
    /// Scalar types with fixed descriptions.
    pub scalars: Vec<ScalarType>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            doc_root: PathBuf::from(DEFAULT_DOC_ROOT),
            module_pattern: DEFAULT_MODULE_PATTERN.to_owned(),
            error_page: DEFAULT_ERROR_PAGE.to_owned(),
            preamble: None,
            extra_types: default_extra_types(),
            skip_names: default_skip_names(),
            skip_paths: vec!["/packed/".to_owned()],
            tagged_enums: vec!["PoolTransactionReject".to_owned()],
            scalars: default_scalars(),
        }
    }
}

/// Type pages only reachable through hand-written docs or untyped parameters.
pub fn default_extra_types() -> Vec<String> {
    [
        "ckb_jsonrpc_types/enum.PoolTransactionReject.html",
        "ckb_jsonrpc_types/struct.IndexerRange.html",
        "ckb_jsonrpc_types/struct.JsonBytes.html",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Names of serialization, pagination and subscription plumbing.
pub fn default_skip_names() -> Vec<String> {
    [
        "ResponseFormat",
        "ResponseFormatInnerType",
        "Either",
        "IndexerPagination",
        "Pagination",
        "Paginated",
        "Topic",
        "SubscriptionSession",
        "SubscriptionId",
        "Uint",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// The fixed-width unsigned integer types encoded as hex strings.
pub fn default_scalars() -> Vec<ScalarType> {
    [(32, "4", "u32"), (64, "8", "u64"), (128, "16", "u128"), (256, "32", "U256")]
        .into_iter()
        .map(|(bits, bytes, rust)| {
            ScalarType::new(
                format!("Uint{bits}"),
                format!(
                    "The {bits}-bit unsigned integer type encoded as the 0x-prefixed hex string \
                     in JSON RPC interface.\n\n\
                     This is a {bytes}-byte unsigned integer (`{rust}`) in Rust. Leading zeros \
                     are not allowed, and `0x0` is the only way to write zero.\n\n\
                     ###### Examples\n\n\
                     | JSON | Decimal Value |\n\
                     | --- | --- |\n\
                     | \"0x0\" | 0 |\n\
                     | \"0x10\" | 16 |\n\
                     | \"10\" | Invalid, 0x is required |\n\
                     | \"0x01\" | Invalid, redundant leading 0 |"
                ),
            )
        })
        .collect()
}

/// Result of a successful run.
#[derive(Debug)]
pub struct GenerationReport {
    /// The assembled document.
    pub document: Document,
    /// Non-fatal problems, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    /// Pages read and extracted.
    pub pages_parsed: usize,
    /// Pages skipped by rule or because they could not be read.
    pub pages_skipped: usize,
}

#[derive(Debug, Default)]
struct Counters {
    parsed: usize,
    skipped: usize,
}

/// Builds the reference document from a rustdoc output tree.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl Generator {
    /// Create a generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the documentation root is missing, the module
    /// pattern is invalid, or the error enum page cannot be read. Problems
    /// on any other page are returned as diagnostics.
    pub fn generate(&self) -> Result<GenerationReport, GenerateError> {
        let start = Instant::now();
        let root = &self.config.doc_root;
        if !root.is_dir() {
            return Err(GenerateError::MissingRoot { path: root.clone() });
        }

        let mut ctx = ResolutionContext::new();
        ctx.set_error_page(&self.config.error_page);
        let mut counters = Counters::default();

        let modules = self.read_modules(&mut ctx, &mut counters)?;
        let errors = self.read_errors(&mut ctx, &mut counters)?;
        let types = self.read_types(&mut ctx, &mut counters);

        let document = Document {
            preamble: self
                .config
                .preamble
                .clone()
                .unwrap_or_else(|| PREAMBLE.to_owned()),
            modules,
            errors,
            types,
        };
        let diagnostics = ctx.into_diagnostics();

        tracing::info!(
            modules = document.modules.len(),
            methods = document.method_count(),
            errors = document.errors.variants.len(),
            types = document.types.len(),
            pages_parsed = counters.parsed,
            pages_skipped = counters.skipped,
            diagnostics = diagnostics.len(),
            elapsed_ms = elapsed_ms(start),
            "Reference generated"
        );

        Ok(GenerationReport {
            document,
            diagnostics,
            pages_parsed: counters.parsed,
            pages_skipped: counters.skipped,
        })
    }

    fn read_modules(
        &self,
        ctx: &mut ResolutionContext,
        counters: &mut Counters,
    ) -> Result<Vec<ModuleEntry>, GenerateError> {
        let root = &self.config.doc_root;
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            self.config.module_pattern
        );

        let mut pages: Vec<(String, String)> = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(path = %e.path().display(), error = %e, "Failed to read module page");
                    counters.skipped += 1;
                    continue;
                }
            };
            let Some(page) = page_id(root, &path) else {
                continue;
            };
            let file_name = page.rsplit('/').next().unwrap_or(&page);
            match module_name(file_name) {
                Some(name) => pages.push((page.clone(), name.to_owned())),
                None => {
                    tracing::debug!(page = %page, "Not a module page");
                    counters.skipped += 1;
                }
            }
        }
        pages.sort();

        let mut modules = Vec::with_capacity(pages.len());
        for (page, name) in pages {
            ctx.enter_page(&page);
            let events = match self.load(&page) {
                Ok(events) => events,
                Err(e) => {
                    ctx.report(DiagnosticKind::Markup {
                        message: e.to_string(),
                    });
                    counters.skipped += 1;
                    continue;
                }
            };
            tracing::debug!(page = %page, module = %name, "Reading module");
            modules.push(extract_module(&name, &events, ctx));
            counters.parsed += 1;
        }
        Ok(modules)
    }

    fn read_errors(
        &self,
        ctx: &mut ResolutionContext,
        counters: &mut Counters,
    ) -> Result<ErrorCatalog, GenerateError> {
        let page = self.config.error_page.as_str();
        // Links into the error enum are error anchors, not types.
        ctx.mark_visited(page);
        ctx.enter_page(page);
        let events = self.load(page).map_err(|source| GenerateError::Page {
            page: page.to_owned(),
            source,
        })?;
        tracing::debug!(page = %page, "Reading error catalog");
        let catalog = extract_error_catalog(&events, ctx);
        counters.parsed += 1;
        Ok(catalog)
    }

    fn read_types(&self, ctx: &mut ResolutionContext, counters: &mut Counters) -> Vec<TypeSchema> {
        let options = SchemaOptions {
            tagged_enums: self.config.tagged_enums.clone(),
        };
        let mut documented: HashSet<String> = HashSet::new();
        let mut types: Vec<TypeSchema> = Vec::new();

        for scalar in &self.config.scalars {
            if documented.insert(scalar.name.clone()) {
                types.push(TypeSchema {
                    name: scalar.name.clone(),
                    doc: Prose::from(scalar.description.as_str()),
                    kind: SchemaKind::Scalar,
                });
            }
        }
        for page in &self.config.extra_types {
            ctx.enqueue(page.clone());
        }

        while let Some(page) = ctx.next_pending() {
            if !ctx.mark_visited(&page) {
                continue;
            }
            ctx.enter_page(&page);

            if self.is_skipped_path(&page) {
                tracing::debug!(page = %page, "Skipping page by path");
                counters.skipped += 1;
                continue;
            }
            let Some(decl) = declaration(&page) else {
                ctx.report(DiagnosticKind::UnsupportedPage);
                counters.skipped += 1;
                continue;
            };
            if self.is_skipped_name(decl.name) || documented.contains(decl.name) {
                tracing::debug!(page = %page, name = decl.name, "Skipping type");
                counters.skipped += 1;
                continue;
            }

            let Some((page, events)) = self.load_following_redirects(&page, ctx) else {
                counters.skipped += 1;
                continue;
            };
            ctx.enter_page(&page);
            tracing::debug!(page = %page, pending = ctx.pending_len(), "Reading type");
            counters.parsed += 1;

            let Some(schema) = extract_schema(&page, &events, &options, ctx) else {
                continue;
            };
            if documented.insert(schema.name.clone()) {
                types.push(schema);
            }
        }

        let serialized: Vec<(String, String)> = ctx
            .serialized_types()
            .map(|(name, base)| (name.to_owned(), base.to_owned()))
            .collect();
        for (name, base) in serialized {
            if documented.insert(name.clone()) {
                types.push(TypeSchema {
                    name,
                    doc: Prose::from(serialized_description(&base).as_str()),
                    kind: SchemaKind::Serialized { base },
                });
            }
        }

        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    /// Load a page, following redirect stubs.
    ///
    /// Returns the identifier of the page finally read with its events, or
    /// `None` after reporting why nothing could be read.
    fn load_following_redirects(
        &self,
        page: &str,
        ctx: &mut ResolutionContext,
    ) -> Option<(String, Vec<TagEvent>)> {
        let mut current = page.to_owned();
        let mut chain = vec![current.clone()];

        for _ in 0..=MAX_REDIRECTS {
            if !self.config.doc_root.join(&current).is_file() {
                ctx.report(DiagnosticKind::MissingPage);
                return None;
            }
            let events = match self.load(&current) {
                Ok(events) => events,
                Err(e) => {
                    ctx.report(DiagnosticKind::Markup {
                        message: e.to_string(),
                    });
                    return None;
                }
            };
            let Some(target) = redirect_target(&events) else {
                return Some((current, events));
            };
            let Some(next) = resolve_page(&current, target) else {
                ctx.report(DiagnosticKind::MissingPage);
                return None;
            };
            tracing::debug!(from = %current, to = %next, "Following redirect");

            if chain.contains(&next) {
                ctx.report(DiagnosticKind::RedirectLoop { target: next });
                return None;
            }
            if !ctx.mark_visited(&next) {
                tracing::debug!(page = %next, "Redirect target already read");
                return None;
            }
            chain.push(next.clone());
            current = next;
        }

        ctx.report(DiagnosticKind::TooManyRedirects);
        None
    }

    fn load(&self, page: &str) -> Result<Vec<TagEvent>, PageError> {
        let html = fs::read_to_string(self.config.doc_root.join(page))?;
        tokenize(&html)
    }

    fn is_skipped_path(&self, page: &str) -> bool {
        let page = format!("/{page}");
        self.config
            .skip_paths
            .iter()
            .any(|fragment| page.contains(fragment.as_str()))
    }

    fn is_skipped_name(&self, name: &str) -> bool {
        self.config.skip_names.iter().any(|skip| skip == name)
    }
}

/// Page identifier of `path`: its `/`-separated path under `root`.
fn page_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<_> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect();
    (!segments.is_empty()).then(|| segments.join("/"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const MODULE_PAGE: &str = r##"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>ChainRpc in ckb_rpc::module - Rust</title><script src="../../static.files/main.js"></script></head>
<body class="rustdoc trait"><main><section id="main-content" class="content">
<pre class="rust item-decl"><code>pub trait ChainRpc {
    fn <a href="#tymethod.get_block" class="fn">get_block</a>(&amp;self, hash: <a class="struct" href="../../ckb_jsonrpc_types/struct.H256.html">H256</a>) -&gt; <a class="type" href="../../jsonrpc_core/type.Result.html">Result</a>&lt;<a class="enum" href="https://doc.rust-lang.org/nightly/core/option/enum.Option.html">Option</a>&lt;<a class="struct" href="../../ckb_jsonrpc_types/struct.BlockView.html">BlockView</a>&gt;&gt;;
}</code></pre>
<details class="toggle top-doc" open><summary class="hideme"><span>Expand description</span></summary><div class="docblock"><p>RPC Module Chain for methods related to the canonical chain.</p></div></details>
<h2 id="required-methods" class="section-header">Required Methods<a href="#required-methods" class="anchor">§</a></h2>
<div class="methods">
<details class="toggle method-toggle" open><summary><section id="tymethod.get_block" class="method"><a class="src rightside" href="../../src/ckb_rpc/module/chain.rs.html#10">source</a><h4 class="code-header">fn <a href="#tymethod.get_block" class="fn">get_block</a>(&amp;self, hash: <a class="struct" href="../../ckb_jsonrpc_types/struct.H256.html" title="struct ckb_jsonrpc_types::H256">H256</a>) -&gt; <a class="type" href="../../jsonrpc_core/type.Result.html" title="type jsonrpc_core::Result">Result</a>&lt;<a class="enum" href="https://doc.rust-lang.org/nightly/core/option/enum.Option.html" title="enum core::option::Option">Option</a>&lt;<a class="struct" href="../../ckb_jsonrpc_types/struct.BlockView.html" title="struct ckb_jsonrpc_types::BlockView">BlockView</a>&gt;&gt;</h4></section></summary><div class="docblock"><p>Returns the information about a block by hash.</p></div></details>
</div>
<h2 id="implementors" class="section-header">Implementors</h2>
</section></main></body></html>"##;

    const ERROR_PAGE: &str = r##"<html><body><main>
<pre class="rust item-decl"><code>pub enum RPCError {
    Invalid = -1,
}</code></pre>
<details class="toggle top-doc" open><summary></summary><div class="docblock"><p>CKB RPC error codes.</p></div></details>
<h2 id="variants" class="variants section-header">Variants</h2>
<section id="variant.Invalid" class="variant"><a href="#variant.Invalid" class="anchor">§</a><h3 class="code-header">Invalid = -1</h3></section><div class="docblock"><p>The input is invalid.</p></div>
</main></body></html>"##;

    const H256_PAGE: &str = r#"<html><body><main>
<pre class="rust item-decl"><code>pub struct H256(pub [u8; 32]);</code></pre>
<details class="toggle top-doc" open><summary></summary><div class="docblock"><p>The 32-byte fixed-length binary data.</p></div></details>
</main></body></html>"#;

    const BLOCK_VIEW_STUB: &str = r#"<!DOCTYPE html><html><head><meta http-equiv="refresh" content="0;URL=blockchain/struct.BlockView.html"></head><body><p>Redirecting to <a href="blockchain/struct.BlockView.html">blockchain/struct.BlockView.html</a>...</p></body></html>"#;

    const BLOCK_VIEW_PAGE: &str = r##"<html><body><main>
<pre class="rust item-decl"><code>pub struct BlockView {
    pub hash: <a class="struct" href="../struct.H256.html">H256</a>,
}</code></pre>
<details class="toggle top-doc" open><summary></summary><div class="docblock"><p>The JSON view of a block.</p></div></details>
<h2 id="fields" class="fields section-header">Fields</h2>
<span id="structfield.hash" class="structfield section-header"><a href="#structfield.hash" class="anchor field">§</a><code>hash: <a class="struct" href="../struct.H256.html">H256</a></code></span><div class="docblock"><p>The block hash.</p></div>
</main></body></html>"##;

    fn write_page(root: &Path, page: &str, html: &str) {
        let path = root.join(page);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, html).unwrap();
    }

    fn doc_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write_page(root, "ckb_rpc/module/trait.ChainRpc.html", MODULE_PAGE);
        write_page(root, "ckb_rpc/enum.RPCError.html", ERROR_PAGE);
        write_page(root, "ckb_jsonrpc_types/struct.H256.html", H256_PAGE);
        write_page(root, "ckb_jsonrpc_types/struct.BlockView.html", BLOCK_VIEW_STUB);
        write_page(
            root,
            "ckb_jsonrpc_types/blockchain/struct.BlockView.html",
            BLOCK_VIEW_PAGE,
        );
        dir
    }

    fn config(root: &Path) -> GeneratorConfig {
        GeneratorConfig {
            doc_root: root.to_path_buf(),
            preamble: Some("# JSON-RPC\n".to_owned()),
            extra_types: Vec::new(),
            scalars: Vec::new(),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_generate_document() {
        let dir = doc_root();
        let report = Generator::new(config(dir.path())).generate().unwrap();

        assert_eq!(report.diagnostics, Vec::new());
        assert_eq!(report.pages_parsed, 4);
        assert_eq!(
            report.document.render(),
            "# JSON-RPC

## Table of Contents

* [RPC Methods](#rpc-methods)
    * [Module Chain](#module-chain)
        * [Method `get_block`](#method-get_block)
* [RPC Errors](#rpc-errors)
    * [Error `Invalid`](#error-invalid)
* [RPC Types](#rpc-types)
    * [Type `BlockView`](#type-blockview)
    * [Type `H256`](#type-h256)

## RPC Methods

### Module Chain

RPC Module Chain for methods related to the canonical chain.

#### Method `get_block`

* get_block(hash)
    * hash: [H256](#type-h256)
* result: [BlockView](#type-blockview) | null

Returns the information about a block by hash.

## RPC Errors

CKB RPC error codes.

### Error `Invalid`

Code: `-1`

The input is invalid.

## RPC Types

### Type `BlockView`

The JSON view of a block.

#### Fields

`BlockView` is a JSON object with the following fields.

*   `hash`: [H256](#type-h256)

    The block hash.

### Type `H256`

The 32-byte fixed-length binary data.
"
        );
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("target/doc");
        let err = Generator::new(config(&missing)).generate().unwrap_err();
        assert!(matches!(err, GenerateError::MissingRoot { path } if path == missing));
    }

    #[test]
    fn test_missing_error_page_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_page(dir.path(), "ckb_rpc/module/trait.ChainRpc.html", MODULE_PAGE);
        let err = Generator::new(config(dir.path())).generate().unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Page { ref page, .. } if page == "ckb_rpc/enum.RPCError.html"
        ));
    }

    #[test]
    fn test_missing_type_page_is_reported() {
        let dir = doc_root();
        fs::remove_file(dir.path().join("ckb_jsonrpc_types/struct.H256.html")).unwrap();
        let report = Generator::new(config(dir.path())).generate().unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].page, "ckb_jsonrpc_types/struct.H256.html");
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::MissingPage);
        let names: Vec<_> = report.document.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["BlockView"]);
    }

    #[test]
    fn test_redirect_loop_is_bounded() {
        let dir = doc_root();
        write_page(
            dir.path(),
            "ckb_jsonrpc_types/blockchain/struct.BlockView.html",
            r#"<meta http-equiv="refresh" content="0;URL=../struct.BlockView.html">"#,
        );
        let report = Generator::new(config(dir.path())).generate().unwrap();

        assert_eq!(
            report.diagnostics[0].kind,
            DiagnosticKind::RedirectLoop {
                target: "ckb_jsonrpc_types/struct.BlockView.html".to_owned()
            }
        );
        assert!(report.document.types.iter().all(|t| t.name != "BlockView"));
    }

    #[test]
    fn test_seeds_and_skip_rules() {
        let dir = doc_root();
        write_page(
            dir.path(),
            "ckb_jsonrpc_types/packed/struct.Internal.html",
            H256_PAGE,
        );
        let config = GeneratorConfig {
            extra_types: vec![
                "ckb_jsonrpc_types/packed/struct.Internal.html".to_owned(),
                "ckb_jsonrpc_types/struct.JsonBytes.html".to_owned(),
            ],
            skip_names: vec!["JsonBytes".to_owned()],
            scalars: vec![ScalarType::new("H256", "A hash.")],
            ..config(dir.path())
        };
        let report = Generator::new(config).generate().unwrap();

        let types: Vec<_> = report
            .document
            .types
            .iter()
            .map(|t| (t.name.as_str(), t.doc.as_str()))
            .collect();
        assert_eq!(
            types,
            vec![
                ("BlockView", "The JSON view of a block."),
                ("H256", "A hash."),
            ]
        );
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.pages_skipped, 3);
    }

    #[test]
    fn test_default_scalars() {
        let scalars = default_scalars();
        let names: Vec<_> = scalars.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Uint32", "Uint64", "Uint128", "Uint256"]);
        assert!(scalars[1].description.contains("8-byte unsigned integer (`u64`)"));
    }

    #[test]
    fn test_page_id() {
        assert_eq!(
            page_id(Path::new("/doc"), Path::new("/doc/ckb_rpc/enum.RPCError.html")).as_deref(),
            Some("ckb_rpc/enum.RPCError.html")
        );
        assert_eq!(page_id(Path::new("/doc"), Path::new("/other/x.html")), None);
    }
}
