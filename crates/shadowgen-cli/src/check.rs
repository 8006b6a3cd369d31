//! `shadowgen check`: validate a manifest without writing anything

use crate::generate::{Failure, load_catalog};
use crate::manifest::Manifest;
use anyhow::Result;
use shadowgen_core::GenerationSession;
use std::path::Path;

/// Outcome of checking every value class in a manifest
#[derive(Debug, Clone, Default)]
pub struct CheckSummary {
    pub checked: usize,
    pub eligible: usize,
    pub failures: Vec<Failure>,
}

/// Check command implementation
pub fn run(manifest_path: &Path) -> Result<()> {
    println!("Checking manifest: {}", manifest_path.display());

    let manifest = Manifest::from_file(manifest_path)?;
    manifest.validate()?;

    let summary = check(&manifest);

    println!("✓ Value classes: {}", summary.checked);
    println!("✓ Marked for generation: {}", summary.eligible);
    for failure in &summary.failures {
        eprintln!("✗ {}: {}", failure.value_class, failure.message);
    }

    if !summary.failures.is_empty() {
        anyhow::bail!("{} value class(es) are invalid", summary.failures.len());
    }

    println!("\nManifest is valid!");
    Ok(())
}

/// Build and validate every value class, eligible or not
pub fn check(manifest: &Manifest) -> CheckSummary {
    let (catalog, mut failures) = load_catalog(manifest);
    let session = GenerationSession::new(&manifest.generator, catalog);

    failures.extend(session.check_all().into_iter().map(|failure| Failure {
        value_class: failure.value_class.to_string(),
        message: failure.error.to_string(),
    }));

    CheckSummary {
        checked: manifest.values.len(),
        eligible: session.eligible().count(),
        failures,
    }
}
