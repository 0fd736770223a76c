//! Configuration management for rpcdoc.
//!
//! Parses `rpcdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [input]
//! doc_root = "target/doc"
//! module_pattern = "ckb_rpc/module/trait.*Rpc.html"
//! error_page = "ckb_rpc/enum.RPCError.html"
//!
//! [output]
//! path = "README.md"
//! preamble = "preamble.md"
//!
//! [types]
//! extra = ["ckb_jsonrpc_types/enum.PoolTransactionReject.html"]
//! skip_paths = ["/packed/"]
//!
//! [[types.scalar]]
//! name = "Uint64"
//! description = "The 64-bit unsigned integer type encoded as a hex string."
//! ```
//!
//! Paths are relative to the directory of the config file. Omitted type
//! lists keep the generator defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the rustdoc output directory.
    pub doc_root: Option<PathBuf>,
    /// Override the output file.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rpcdoc.toml";

/// Default rustdoc output directory.
const DEFAULT_DOC_ROOT: &str = "target/doc";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration (paths are relative strings from TOML).
    input: InputConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Type documentation rules.
    pub types: TypesConfig,

    /// Resolved input configuration (set after loading).
    #[serde(skip)]
    pub input_resolved: InputConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw input configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InputConfigRaw {
    doc_root: Option<String>,
    module_pattern: Option<String>,
    error_page: Option<String>,
}

/// Resolved input configuration.
#[derive(Debug, Default)]
pub struct InputConfig {
    /// Directory holding the rustdoc output.
    pub doc_root: PathBuf,
    /// Glob of module trait pages, relative to `doc_root`.
    pub module_pattern: Option<String>,
    /// Error enum page, relative to `doc_root`.
    pub error_page: Option<String>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
    preamble: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Output file; stdout when unset.
    pub path: Option<PathBuf>,
    /// Markdown file replacing the built-in preamble.
    pub preamble: Option<PathBuf>,
}

/// Type documentation rules.
///
/// Unset lists keep the generator defaults; set lists replace them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Type pages documented even when nothing links to them.
    pub extra: Option<Vec<String>>,
    /// Type names never documented.
    pub skip_names: Option<Vec<String>>,
    /// Path fragments of pages never documented.
    pub skip_paths: Option<Vec<String>>,
    /// Enums rendered as a type/description table.
    pub tagged_enums: Option<Vec<String>>,
    /// Scalars added to, or replacing, the built-in ones by name.
    pub scalar: Vec<ScalarConfig>,
}

/// A scalar type with a hand-written description.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ScalarConfig {
    /// Type name.
    pub name: String,
    /// Markdown description.
    pub description: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rpcdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(doc_root) = &settings.doc_root {
            self.input_resolved.doc_root.clone_from(doc_root);
        }
        if let Some(output) = &settings.output {
            self.output_resolved.path = Some(output.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            input_resolved: InputConfig {
                doc_root: base.join(DEFAULT_DOC_ROOT),
                module_pattern: None,
                error_page: None,
            },
            ..Self::default()
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_input()?;
        self.validate_types()?;
        Ok(())
    }

    fn validate_input(&self) -> Result<(), ConfigError> {
        if let Some(pattern) = &self.input_resolved.module_pattern {
            require_non_empty(pattern, "input.module_pattern")?;
        }
        if let Some(page) = &self.input_resolved.error_page {
            require_non_empty(page, "input.error_page")?;
            if !page.ends_with(".html") {
                return Err(ConfigError::Validation(format!(
                    "input.error_page must be an .html page, got {page}"
                )));
            }
        }
        Ok(())
    }

    fn validate_types(&self) -> Result<(), ConfigError> {
        for scalar in &self.types.scalar {
            require_non_empty(&scalar.name, "types.scalar.name")?;
        }
        if let Some(extra) = &self.types.extra
            && let Some(page) = extra.iter().find(|page| !page.ends_with(".html"))
        {
            return Err(ConfigError::Validation(format!(
                "types.extra entries must be .html pages, got {page}"
            )));
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.input_resolved = InputConfig {
            doc_root: resolve(self.input.doc_root.as_deref(), DEFAULT_DOC_ROOT),
            module_pattern: self.input.module_pattern.clone(),
            error_page: self.input.error_page.clone(),
        };

        self.output_resolved = OutputConfig {
            path: self.output.path.as_deref().map(|p| config_dir.join(p)),
            preamble: self.output.preamble.as_deref().map(|p| config_dir.join(p)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.input_resolved.doc_root,
            PathBuf::from("/test/target/doc")
        );
        assert_eq!(config.input_resolved.module_pattern, None);
        assert_eq!(config.output_resolved.path, None);
        assert!(config.types.extra.is_none());
        assert!(config.types.scalar.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.input.doc_root.is_none());
        assert!(config.types.skip_names.is_none());
    }

    #[test]
    fn test_parse_types_config() {
        let toml = r#"
[types]
extra = ["ckb_jsonrpc_types/struct.JsonBytes.html"]
skip_names = ["Either"]
tagged_enums = ["PoolTransactionReject", "Status"]

[[types.scalar]]
name = "Uint64"
description = "A hex-encoded u64."

[[types.scalar]]
name = "Byte32"
description = "32 bytes."
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.types.extra,
            Some(vec!["ckb_jsonrpc_types/struct.JsonBytes.html".to_owned()])
        );
        assert_eq!(config.types.skip_names, Some(vec!["Either".to_owned()]));
        assert_eq!(config.types.skip_paths, None);
        assert_eq!(
            config.types.tagged_enums,
            Some(vec!["PoolTransactionReject".to_owned(), "Status".to_owned()])
        );
        assert_eq!(
            config.types.scalar,
            vec![
                ScalarConfig {
                    name: "Uint64".to_owned(),
                    description: "A hex-encoded u64.".to_owned(),
                },
                ScalarConfig {
                    name: "Byte32".to_owned(),
                    description: "32 bytes.".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[input]
doc_root = "build/doc"
error_page = "ckb_rpc/enum.RPCError.html"

[output]
path = "rpc/README.md"
preamble = "rpc/preamble.md"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.input_resolved.doc_root,
            PathBuf::from("/project/build/doc")
        );
        assert_eq!(
            config.input_resolved.error_page.as_deref(),
            Some("ckb_rpc/enum.RPCError.html")
        );
        assert_eq!(
            config.output_resolved.path,
            Some(PathBuf::from("/project/rpc/README.md"))
        );
        assert_eq!(
            config.output_resolved.preamble,
            Some(PathBuf::from("/project/rpc/preamble.md"))
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.input_resolved.doc_root,
            PathBuf::from("/project/target/doc")
        );
        assert_eq!(config.output_resolved.path, None);
        assert_eq!(config.output_resolved.preamble, None);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            doc_root: Some(PathBuf::from("/custom/doc")),
            output: Some(PathBuf::from("out.md")),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.input_resolved.doc_root, PathBuf::from("/custom/doc"));
        assert_eq!(config.output_resolved.path, Some(PathBuf::from("out.md")));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.input_resolved.doc_root,
            PathBuf::from("/test/target/doc")
        );
        assert_eq!(config.output_resolved.path, None);
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_module_pattern() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.input_resolved.module_pattern = Some(String::new());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("input.module_pattern"));
    }

    #[test]
    fn test_validate_error_page_extension() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.input_resolved.error_page = Some("ckb_rpc/enum.RPCError".to_owned());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("input.error_page"));
    }

    #[test]
    fn test_validate_scalar_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.types.scalar.push(ScalarConfig {
            name: " ".to_owned(),
            description: "Blank.".to_owned(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("types.scalar.name"));
    }

    #[test]
    fn test_validate_extra_pages() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.types.extra = Some(vec!["ckb_jsonrpc_types/struct.JsonBytes".to_owned()]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("types.extra"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[input]
doc_root = "doc"

[output]
path = "README.md"
"#,
        )
        .unwrap();

        let overrides = CliSettings {
            output: Some(PathBuf::from("/tmp/other.md")),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.input_resolved.doc_root, dir.path().join("doc"));
        assert_eq!(
            config.output_resolved.path,
            Some(PathBuf::from("/tmp/other.md"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[input\ndoc_root = 1").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[input]\nmodule_pattern = \"\"\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
