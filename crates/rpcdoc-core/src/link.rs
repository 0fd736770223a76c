//! Link targets: page identifiers, declaration names and local anchors.

use crate::consts::{METHOD_ID_PREFIX, VARIANT_ID_PREFIX};

/// Item kinds whose pages document a data type.
const TYPE_DECLARATION_KINDS: &[&str] = &["struct", "enum", "type", "union"];

/// Standard library crates; local copies of their docs are never documented.
const STD_CRATES: &[&str] = &["std", "core", "alloc"];

/// Item named by the last path segment of a rustdoc link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Item kind (`struct`, `enum`, `primitive`, ...).
    pub kind: &'a str,
    /// Item name (`BlockView`, `Option`, `u64`, ...).
    pub name: &'a str,
}

impl Declaration<'_> {
    /// Whether the item is a documentable data type.
    #[must_use]
    pub fn is_type(&self) -> bool {
        TYPE_DECLARATION_KINDS.contains(&self.kind)
    }
}

/// Parse the item declared by a link such as `../../crate/struct.Name.html#impl`.
#[must_use]
pub fn declaration(href: &str) -> Option<Declaration<'_>> {
    let file = strip_fragment(href).rsplit('/').next()?;
    let stem = file.strip_suffix(".html")?;
    let (kind, name) = stem.split_once('.')?;
    if kind.is_empty() || name.is_empty() || name.contains('.') {
        return None;
    }
    Some(Declaration { kind, name })
}

/// Whether the link leaves the generated documentation tree or points into
/// the standard library docs.
#[must_use]
pub fn is_external(href: &str) -> bool {
    href.contains("://")
        || strip_fragment(href)
            .split('/')
            .any(|segment| STD_CRATES.contains(&segment))
}

/// Rewrite a link found in documentation prose into a local anchor.
///
/// Error variants, trait methods and type declarations all have a section in
/// the generated document; any other target is returned unchanged.
/// `error_page` is the file name of the error enum page.
///
/// # Examples
///
/// ```
/// use rpcdoc_core::rewrite_link;
///
/// let errors = "enum.RPCError.html";
/// assert_eq!(rewrite_link("../enum.RPCError.html#variant.Invalid", errors), "#error-invalid");
/// assert_eq!(rewrite_link("trait.ChainRpc.html#tymethod.get_block", errors), "#method-get_block");
/// assert_eq!(rewrite_link("../../ckb_jsonrpc_types/struct.Script.html", errors), "#type-script");
/// assert_eq!(rewrite_link("https://example.com", errors), "https://example.com");
/// ```
#[must_use]
pub fn rewrite_link(href: &str, error_page: &str) -> String {
    if is_external(href) {
        return href.to_owned();
    }
    let (path, fragment) = href.split_once('#').unwrap_or((href, ""));

    if path.rsplit('/').next() == Some(error_page)
        && let Some(variant) = fragment.strip_prefix(VARIANT_ID_PREFIX)
    {
        return error_anchor(variant);
    }
    if let Some(method) = fragment.strip_prefix(METHOD_ID_PREFIX) {
        return method_anchor(method);
    }
    match declaration(path) {
        Some(decl) if decl.is_type() => type_anchor(decl.name),
        _ => href.to_owned(),
    }
}

/// Anchor of a type section.
#[must_use]
pub fn type_anchor(name: &str) -> String {
    format!("#type-{}", name.to_lowercase())
}

/// Markdown link to a type section.
#[must_use]
pub fn type_link(name: &str) -> String {
    format!("[{name}]({})", type_anchor(name))
}

/// Anchor of a method section.
#[must_use]
pub fn method_anchor(name: &str) -> String {
    format!("#method-{}", name.to_lowercase())
}

/// Anchor of an error section.
#[must_use]
pub fn error_anchor(name: &str) -> String {
    format!("#error-{}", name.to_lowercase())
}

/// Anchor of a module section.
#[must_use]
pub fn module_anchor(name: &str) -> String {
    format!("#module-{}", name.to_lowercase())
}

/// Resolve `href` against the page it appears on.
///
/// Page identifiers are `/`-separated paths relative to the documentation
/// root. Fragments and queries are dropped. Returns `None` for external
/// links, fragment-only links and paths escaping the root.
///
/// # Examples
///
/// ```
/// use rpcdoc_core::resolve_page;
///
/// assert_eq!(
///     resolve_page("ckb_rpc/module/trait.ChainRpc.html", "../../ckb_jsonrpc_types/struct.H256.html"),
///     Some("ckb_jsonrpc_types/struct.H256.html".to_owned())
/// );
/// assert_eq!(
///     resolve_page("ckb_jsonrpc_types/struct.Block.html", "struct.Header.html#fields"),
///     Some("ckb_jsonrpc_types/struct.Header.html".to_owned())
/// );
/// assert_eq!(resolve_page("a/b.html", "../../x.html"), None);
/// ```
#[must_use]
pub fn resolve_page(base_page: &str, href: &str) -> Option<String> {
    if is_external(href) {
        return None;
    }
    let target = strip_fragment(href);
    let target = target.split('?').next().unwrap_or(target);
    if target.is_empty() {
        return None;
    }

    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        let mut base: Vec<&str> = base_page.split('/').filter(|s| !s.is_empty()).collect();
        // The last segment of the base is the page itself.
        base.pop();
        base
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

fn strip_fragment(href: &str) -> &str {
    href.split('#').next().unwrap_or(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERRORS: &str = "enum.RPCError.html";

    #[test]
    fn test_declaration_struct() {
        assert_eq!(
            declaration("../../ckb_jsonrpc_types/struct.BlockView.html"),
            Some(Declaration {
                kind: "struct",
                name: "BlockView"
            })
        );
    }

    #[test]
    fn test_declaration_with_fragment() {
        let decl = declaration("enum.Option.html#variant.None").unwrap();
        assert_eq!(decl.kind, "enum");
        assert_eq!(decl.name, "Option");
    }

    #[test]
    fn test_declaration_rejects_non_item_pages() {
        assert_eq!(declaration("index.html"), None);
        assert_eq!(declaration("#tymethod.get_block"), None);
        assert_eq!(declaration("../all.html"), None);
    }

    #[test]
    fn test_declaration_is_type() {
        assert!(declaration("type.Uint64.html").unwrap().is_type());
        assert!(!declaration("trait.ChainRpc.html").unwrap().is_type());
        assert!(!declaration("primitive.u64.html").unwrap().is_type());
    }

    #[test]
    fn test_rewrite_error_link() {
        assert_eq!(
            rewrite_link("../enum.RPCError.html#variant.CKBInternalError", ERRORS),
            "#error-ckbinternalerror"
        );
    }

    #[test]
    fn test_rewrite_error_page_without_variant_is_type() {
        assert_eq!(rewrite_link("../enum.RPCError.html", ERRORS), "#type-rpcerror");
    }

    #[test]
    fn test_rewrite_configured_error_page() {
        assert_eq!(
            rewrite_link("../enum.ApiError.html#variant.Invalid", "enum.ApiError.html"),
            "#error-invalid"
        );
        assert_eq!(
            rewrite_link("../enum.RPCError.html#variant.Invalid", "enum.ApiError.html"),
            "#type-rpcerror"
        );
    }

    #[test]
    fn test_rewrite_local_method_link() {
        assert_eq!(rewrite_link("#tymethod.get_tip_header", ERRORS), "#method-get_tip_header");
    }

    #[test]
    fn test_rewrite_type_link() {
        assert_eq!(
            rewrite_link("../../ckb_jsonrpc_types/enum.Status.html#variant.Pending", ERRORS),
            "#type-status"
        );
    }

    #[test]
    fn test_rewrite_passthrough() {
        assert_eq!(rewrite_link("#examples", ERRORS), "#examples");
        assert_eq!(rewrite_link("trait.ChainRpc.html", ERRORS), "trait.ChainRpc.html");
        assert_eq!(
            rewrite_link("https://doc.rust-lang.org/std/option/enum.Option.html", ERRORS),
            "https://doc.rust-lang.org/std/option/enum.Option.html"
        );
    }

    #[test]
    fn test_anchors_are_lowercase() {
        assert_eq!(type_anchor("H256"), "#type-h256");
        assert_eq!(type_link("BlockView"), "[BlockView](#type-blockview)");
        assert_eq!(module_anchor("Chain"), "#module-chain");
        assert_eq!(method_anchor("get_block"), "#method-get_block");
        assert_eq!(error_anchor("Invalid"), "#error-invalid");
    }

    #[test]
    fn test_resolve_page_sibling() {
        assert_eq!(
            resolve_page("ckb_jsonrpc_types/struct.Block.html", "struct.Header.html"),
            Some("ckb_jsonrpc_types/struct.Header.html".to_owned())
        );
    }

    #[test]
    fn test_resolve_page_parent_dirs() {
        assert_eq!(
            resolve_page(
                "ckb_rpc/module/trait.ChainRpc.html",
                "../../ckb_jsonrpc_types/./struct.H256.html"
            ),
            Some("ckb_jsonrpc_types/struct.H256.html".to_owned())
        );
    }

    #[test]
    fn test_resolve_page_rooted() {
        assert_eq!(
            resolve_page("a/b/c.html", "/x/struct.Y.html"),
            Some("x/struct.Y.html".to_owned())
        );
    }

    #[test]
    fn test_resolve_page_rejects() {
        assert_eq!(resolve_page("a/b.html", "https://example.com/x.html"), None);
        assert_eq!(resolve_page("a/b.html", "#fields"), None);
        assert_eq!(resolve_page("a/b.html", "../../escape.html"), None);
    }

    #[test]
    fn test_std_links_are_external() {
        assert!(is_external("../../std/net/struct.SocketAddr.html"));
        assert!(is_external("../../core/option/enum.Option.html"));
        assert!(!is_external("../../ckb_jsonrpc_types/struct.Script.html"));
        assert_eq!(resolve_page("a/b.html", "../std/string/struct.String.html"), None);
    }
}
