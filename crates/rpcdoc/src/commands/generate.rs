//! Reference generation command.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use rpcdoc_config::{CliSettings, Config};
use rpcdoc_core::{Document, GenerationReport, Generator, GeneratorConfig, ScalarType};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for reference generation.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover rpcdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rustdoc output directory (overrides config).
    #[arg(short, long, env = "RPCDOC_DOC_ROOT")]
    doc_root: Option<PathBuf>,

    /// Output file (overrides config; default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output (progress and timing logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Fail without writing the document if any diagnostic was reported.
    #[arg(long)]
    strict: bool,
}

impl GenerateArgs {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, generation fails, the
    /// document cannot be written, or `--strict` is set and diagnostics were
    /// reported.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            doc_root: self.doc_root,
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let generator_config = generator_config(&config)?;
        output.info(&format!(
            "Documentation root: {}",
            generator_config.doc_root.display()
        ));

        let report = Generator::new(generator_config).generate()?;
        print_summary(output, &report);

        if self.strict && !report.diagnostics.is_empty() {
            return Err(CliError::Strict {
                count: report.diagnostics.len(),
            });
        }

        match &config.output_resolved.path {
            Some(path) => {
                write_file(&report.document, path)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = io::stdout().lock();
                report.document.write_to(&mut stdout)?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Build the generator configuration, keeping generator defaults for
/// everything the config file leaves unset.
fn generator_config(config: &Config) -> Result<GeneratorConfig, CliError> {
    let mut generator = GeneratorConfig {
        doc_root: config.input_resolved.doc_root.clone(),
        ..GeneratorConfig::default()
    };

    if let Some(pattern) = &config.input_resolved.module_pattern {
        generator.module_pattern.clone_from(pattern);
    }
    if let Some(page) = &config.input_resolved.error_page {
        generator.error_page.clone_from(page);
    }
    if let Some(path) = &config.output_resolved.preamble {
        let preamble = fs::read_to_string(path).map_err(|source| CliError::Preamble {
            path: path.clone(),
            source,
        })?;
        generator.preamble = Some(preamble);
    }

    let types = &config.types;
    if let Some(extra) = &types.extra {
        generator.extra_types.clone_from(extra);
    }
    if let Some(names) = &types.skip_names {
        generator.skip_names.clone_from(names);
    }
    if let Some(paths) = &types.skip_paths {
        generator.skip_paths.clone_from(paths);
    }
    if let Some(tagged) = &types.tagged_enums {
        generator.tagged_enums.clone_from(tagged);
    }
    for scalar in &types.scalar {
        match generator.scalars.iter_mut().find(|s| s.name == scalar.name) {
            Some(existing) => existing.description.clone_from(&scalar.description),
            None => generator
                .scalars
                .push(ScalarType::new(scalar.name.clone(), scalar.description.clone())),
        }
    }

    Ok(generator)
}

fn write_file(document: &Document, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    document.write_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn print_summary(output: &Output, report: &GenerationReport) {
    let document = &report.document;
    output.info(&format!(
        "Documented {} modules, {} methods, {} errors, {} types",
        document.modules.len(),
        document.method_count(),
        document.errors.variants.len(),
        document.types.len(),
    ));
    output.detail(&format!(
        "Pages parsed: {}, skipped: {}",
        report.pages_parsed, report.pages_skipped
    ));
    if report.diagnostics.is_empty() {
        return;
    }
    output.warning(&format!("{} diagnostic(s):", report.diagnostics.len()));
    for diagnostic in &report.diagnostics {
        output.warning(&format!("  {diagnostic}"));
    }
}
