//! Rendering generated units to files.
//!
//! ```text
//! GeneratedUnit
//!     ├─→ [Java Generator] → <package>/<GeneratedClass>.java
//!     └─→ [JSON Generator] → <package>/<GeneratedClass>.json
//! ```

pub mod imports;
pub mod java;
pub mod json;

use anyhow::Result;
use shadowgen_core::GeneratedUnit;
use std::path::{Path, PathBuf};

pub use java::generate_java;
pub use json::generate_json;

/// Output language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Java source for the generated class and its shadow
    #[default]
    Java,
    /// The generation model as JSON
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Java => "java",
            OutputFormat::Json => "json",
        }
    }
}

/// Render `unit` in `format`
pub fn render(unit: &GeneratedUnit, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Java => Ok(generate_java(unit)),
        OutputFormat::Json => generate_json(unit),
    }
}

/// `<output_dir>/<package path>/<GeneratedClass>.<ext>`
pub fn output_path(output_dir: &Path, unit: &GeneratedUnit, format: OutputFormat) -> PathBuf {
    let name = &unit.wrapper.name;
    let mut path = output_dir.to_path_buf();
    for segment in name.package().split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.{}", name.simple_name(), format.extension()));
    path
}
