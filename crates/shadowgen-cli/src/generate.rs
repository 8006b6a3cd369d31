//! `shadowgen generate`: run a session over a manifest and write one file per
//! generated class

use crate::codegen::{OutputFormat, output_path, render};
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use shadowgen_core::{GenerationSession, ValueClass};
use std::fs;
use std::path::{Path, PathBuf};

/// A value class that produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub value_class: String,
    pub message: String,
}

/// What one generate run produced
#[derive(Debug, Clone, Default)]
pub struct GenerateSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl GenerateSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate command implementation
pub fn run(manifest_path: &Path, output_dir: &Path, format: OutputFormat) -> Result<()> {
    let manifest = Manifest::from_file(manifest_path)?;
    manifest.validate()?;

    let summary = generate(&manifest, output_dir, format)?;

    for path in &summary.written {
        println!("✓ {}", path.display());
    }
    for failure in &summary.failures {
        eprintln!("✗ {}: {}", failure.value_class, failure.message);
    }

    if !summary.is_success() {
        anyhow::bail!(
            "{} value class(es) failed to generate",
            summary.failures.len()
        );
    }

    println!("\nGenerated {} file(s)", summary.written.len());
    Ok(())
}

/// Generate every eligible value class of `manifest` into `output_dir`.
///
/// Schemas that fail are collected in the summary; the others are still
/// written.
pub fn generate(
    manifest: &Manifest,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<GenerateSummary> {
    let mut summary = GenerateSummary::default();

    let (catalog, failures) = load_catalog(manifest);
    summary.failures.extend(failures);

    let session = GenerationSession::new(&manifest.generator, catalog);
    let report = session.run();

    for unit in &report.units {
        let path = output_path(output_dir, unit, format);
        let content = render(unit, format)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {path:?}"))?;

        tracing::info!("Wrote {}", path.display());
        summary.written.push(path);
    }

    summary
        .failures
        .extend(report.failures.iter().map(|f| Failure {
            value_class: f.value_class.to_string(),
            message: f.error.to_string(),
        }));

    Ok(summary)
}

/// Build the catalog, keeping entries that fail to build as failures
pub fn load_catalog(manifest: &Manifest) -> (Vec<ValueClass>, Vec<Failure>) {
    let mut catalog = Vec::new();
    let mut failures = Vec::new();

    for (name, result) in manifest.value_classes() {
        match result {
            Ok(value) => catalog.push(value),
            Err(error) => {
                tracing::debug!("Skipping {}: {}", name, error);
                failures.push(Failure {
                    value_class: name.to_string(),
                    message: error.to_string(),
                });
            }
        }
    }

    (catalog, failures)
}
