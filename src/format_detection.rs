use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// A JSON array of objects.
    Json,
    /// A JavaScript file assigning the JSON array to a constant.
    Script,
}

/// Picks the output format from the destination's extension.
///
/// `.js`, `.mjs` and `.cjs` produce a script; anything else, including no
/// extension at all, produces JSON.
pub fn detect_output_format(output_path: &Path) -> OutputFormat {
    let ext = output_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match ext.as_deref() {
        Some("js" | "mjs" | "cjs") => OutputFormat::Script,
        _ => OutputFormat::Json,
    }
}
