pub mod config;
pub mod emitters;
pub mod error;
pub mod format_detection;
pub mod table;
pub mod value_conversion;

// Re-export commonly used items for convenience
pub use config::{ConversionConfig, HAKONE_COLUMNS};
pub use emitters::json::{to_json, JsonEmitter, JsonStyle};
pub use emitters::script::{to_script_assignment, ScriptEmitter};
pub use emitters::Emitter;
pub use error::{ConvertError, Result};
pub use format_detection::{detect_output_format, OutputFormat};
pub use table::{ParseOptions, Record, Row, RowPolicy, Table};
pub use value_conversion::{convert_field_value, ValueConversion, ValueMode};

use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub rows: usize,
    pub columns: usize,
}

/// Reads, projects, renders and writes according to `config`.
///
/// The output file is only created once the whole document has been rendered,
/// so any failure leaves no output behind.
pub fn convert(config: &ConversionConfig) -> Result<ConversionSummary> {
    config.validate()?;

    let table = Table::from_path(&config.input, &config.parse_options()?)?;
    info!(
        input = %config.input.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "read input table"
    );

    let records = match &config.columns {
        Some(columns) => table.project(columns.as_slice())?,
        None => table.records(),
    };

    let format = config.output_format();
    config.emitter().write_to_path(&records, &config.output)?;
    info!(output = %config.output.display(), ?format, "wrote output");

    Ok(ConversionSummary {
        output: config.output.clone(),
        format,
        rows: records.len(),
        columns: config
            .columns
            .as_ref()
            .map_or(table.columns().len(), Vec::len),
    })
}

/// Converts every column of a TSV file to a pretty-printed JSON file
pub fn convert_tsv_to_json(input_path: &Path, output_path: &Path) -> Result<ConversionSummary> {
    let config = ConversionConfig {
        format: Some(OutputFormat::Json),
        ..ConversionConfig::json(input_path, output_path)
    };
    convert(&config)
}
