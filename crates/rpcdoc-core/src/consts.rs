//! Naming conventions of rustdoc output and fixed document text.

/// `id` prefix of a required trait method heading.
pub const METHOD_ID_PREFIX: &str = "tymethod.";

/// `id` prefix of an enum variant heading.
pub const VARIANT_ID_PREFIX: &str = "variant.";

/// `id` prefix of a struct field heading.
pub const FIELD_ID_PREFIX: &str = "structfield.";

/// File name of the default error enum page; variant links into it become
/// error anchors.
pub const ERROR_ENUM_PAGE: &str = "enum.RPCError.html";

/// Receiver text that opens every method signature.
pub const SELF_PARAM_PREFIX: &str = "&self";

/// Separates parameters from the return type in a signature.
pub const FUNCTION_ARROW: &str = "->";

/// Prefix of the synthesized type documenting a serialized union arm.
pub const SERIALIZED_PREFIX: &str = "Serialized";

/// Documentation root, relative to the workspace.
pub const DEFAULT_DOC_ROOT: &str = "target/doc";

/// Glob of the RPC module trait pages, relative to the documentation root.
pub const DEFAULT_MODULE_PATTERN: &str = "ckb_rpc/module/trait.*Rpc.html";

/// The RPC error enum page, relative to the documentation root.
pub const DEFAULT_ERROR_PAGE: &str = "ckb_rpc/enum.RPCError.html";

/// Maximum number of redirect stubs followed for one page.
pub const MAX_REDIRECTS: usize = 8;

/// Heading offset for module docs (`<h1>` becomes `####`).
pub const MODULE_TITLE_LEVEL: usize = 3;

/// Heading offset for method docs.
pub const METHOD_TITLE_LEVEL: usize = 4;

/// Heading offset for type, error and catalog docs.
pub const TYPE_TITLE_LEVEL: usize = 3;

/// Heading offset for field and variant docs.
pub const MEMBER_TITLE_LEVEL: usize = 4;

/// Indent of field and variant docs under their bullet.
pub const MEMBER_INDENT: usize = 4;

/// Built-in document preamble.
pub const PREAMBLE: &str = "# JSON-RPC Protocols

<!--**NOTE:** This file is auto-generated from code comments.-->

The RPC interface shares the version of the node, which is returned in `local_node_info`. \
The interface is fully compatible between patch versions, for example, a client for 0.25.0 \
should work with 0.25.x for any x.

Allowing arbitrary machines to access the JSON-RPC port is **dangerous and strongly \
discouraged**. Please strictly limit the access to only trusted machines.

The JSON-RPC endpoint only supports HTTP. If you need TLS, set up a proxy via Nginx or \
another HTTP server.

Subscriptions require a full duplex connection, offered in the form of TCP and WebSockets.

## JSON-RPC Deprecation Process

A RPC method can be deprecated in three steps.

First, the method is marked as deprecated in the release notes and in this document. \
The method is still available and the document provides the alternative solutions.

The deprecated method is disabled starting from the next minor version release. Users \
can enable deprecated methods via the configuration file.

Once a deprecated method is disabled, it is removed in a future minor version release.
";

/// Description of a synthesized serialized union arm.
pub(crate) fn serialized_description(base: &str) -> String {
    format!(
        "The serialized form of `{base}`: the molecule encoding of `{base}` as a 0x-prefixed \
         hex string."
    )
}
