//! CLI error types.

use std::path::PathBuf;

use rpcdoc_config::ConfigError;
use rpcdoc_core::GenerateError;

/// Exit status when the documentation root is missing (`EX_NOINPUT`).
pub(crate) const EXIT_NO_INPUT: i32 = 66;

/// Exit status when `--strict` is set and diagnostics were reported.
pub(crate) const EXIT_DIAGNOSTICS: i32 = 3;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read preamble {}: {source}", .path.display())]
    Preamble {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} diagnostic(s) reported in strict mode")]
    Strict { count: usize },
}

impl CliError {
    /// Process exit status for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Generate(GenerateError::MissingRoot { .. }) => EXIT_NO_INPUT,
            Self::Strict { .. } => EXIT_DIAGNOSTICS,
            _ => 1,
        }
    }

    /// What the user can do about the error, if there is an obvious fix.
    pub(crate) fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Generate(GenerateError::MissingRoot { .. }) => Some(
                "Generate the rustdoc output first, for example with \
                 `cargo doc -p ckb-rpc -p ckb-jsonrpc-types --no-deps`, \
                 or point --doc-root at an existing output directory.",
            ),
            Self::Strict { .. } => Some("Rerun without --strict to write the document anyway."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_exit_code() {
        let err = CliError::from(GenerateError::MissingRoot {
            path: PathBuf::from("target/doc"),
        });
        assert_eq!(err.exit_code(), EXIT_NO_INPUT);
        assert!(err.hint().unwrap().contains("--doc-root"));
        assert_eq!(err.to_string(), "documentation root not found: target/doc");
    }

    #[test]
    fn test_strict_exit_code() {
        let err = CliError::Strict { count: 2 };
        assert_eq!(err.exit_code(), EXIT_DIAGNOSTICS);
        assert_eq!(err.to_string(), "2 diagnostic(s) reported in strict mode");
    }

    #[test]
    fn test_generic_exit_code() {
        let err = CliError::from(ConfigError::Validation("bad".to_owned()));
        assert_eq!(err.exit_code(), 1);
        assert!(err.hint().is_none());
    }
}
