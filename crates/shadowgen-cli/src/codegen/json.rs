//! JSON dump of a generated unit, for inspecting the model without a Java
//! toolchain.

use anyhow::{Context, Result};
use shadowgen_core::GeneratedUnit;

/// Pretty-printed JSON for `unit`
pub fn generate_json(unit: &GeneratedUnit) -> Result<String> {
    let mut json = serde_json::to_string_pretty(unit)
        .with_context(|| format!("Failed to serialize model for {}", unit.value_class))?;
    json.push('\n');
    Ok(json)
}
