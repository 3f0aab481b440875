//! Conversion settings.
//!
//! Every option can come from a JSON file (see [`ConversionConfig::load`]);
//! missing keys fall back to [`ConversionConfig::default`].

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::emitters::json::{JsonEmitter, JsonStyle};
use crate::emitters::script::{validate_variable_name, ScriptEmitter, DEFAULT_VARIABLE_NAME};
use crate::emitters::Emitter;
use crate::error::{ConvertError, Result};
use crate::format_detection::{detect_output_format, OutputFormat};
use crate::table::{ParseOptions, RowPolicy};
use crate::value_conversion::{ValueConversion, ValueMode};

/// Columns exported by the Hakone earthquake data file.
pub const HAKONE_COLUMNS: [&str; 5] = [
    "easting",
    "northing",
    "depth",
    "decimal year",
    "rupture diameter",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: char,
    /// Columns to keep, in output order. `None` keeps every column.
    pub columns: Option<Vec<String>>,
    pub variable_name: String,
    /// `None` means detect from the output extension.
    pub format: Option<OutputFormat>,
    /// `None` means the format's default style.
    pub style: Option<JsonStyle>,
    pub values: ValueMode,
    pub string_fields: Vec<String>,
    pub row_policy: RowPolicy,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            delimiter: '\t',
            columns: None,
            variable_name: DEFAULT_VARIABLE_NAME.to_string(),
            format: None,
            style: None,
            values: ValueMode::Strings,
            string_fields: Vec::new(),
            row_policy: RowPolicy::Strict,
        }
    }
}

impl ConversionConfig {
    /// Every column of `input` to a JSON file at `output`.
    pub fn json(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// The Hakone data file: five numeric columns of `hakone.tsv` assigned to
    /// `jsonData` in `hakone_data.js`.
    pub fn hakone() -> Self {
        Self {
            input: PathBuf::from("hakone.tsv"),
            output: PathBuf::from("hakone_data.js"),
            columns: Some(HAKONE_COLUMNS.iter().map(|c| c.to_string()).collect()),
            format: Some(OutputFormat::Script),
            style: Some(JsonStyle::Spaced),
            values: ValueMode::Inferred,
            ..Self::default()
        }
    }

    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ConvertError::Config(format!("{}: {e}", path.display())))
    }

    /// Checks the settings that would otherwise only fail mid-conversion.
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.output_format() == OutputFormat::Script {
            validate_variable_name(&self.variable_name)?;
        }
        if let Some(columns) = &self.columns {
            if columns.is_empty() {
                return Err(ConvertError::Config(
                    "column selection must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter {
            '\n' | '\r' | '"' => Err(ConvertError::InvalidDelimiter(self.delimiter)),
            c if c.is_ascii() => Ok(c as u8),
            c => Err(ConvertError::InvalidDelimiter(c)),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| detect_output_format(&self.output))
    }

    pub fn json_style(&self) -> JsonStyle {
        self.style.unwrap_or(match self.output_format() {
            OutputFormat::Json => JsonStyle::Pretty,
            OutputFormat::Script => JsonStyle::Spaced,
        })
    }

    pub fn parse_options(&self) -> Result<ParseOptions> {
        Ok(ParseOptions {
            delimiter: self.delimiter_byte()?,
            row_policy: self.row_policy,
        })
    }

    pub fn value_conversion(&self) -> ValueConversion {
        ValueConversion::new(self.values, self.string_fields.clone())
    }

    /// The renderer for the configured format.
    pub fn emitter(&self) -> Box<dyn Emitter> {
        let json = JsonEmitter::new(self.json_style(), self.value_conversion());
        match self.output_format() {
            OutputFormat::Json => Box::new(json),
            OutputFormat::Script => Box::new(ScriptEmitter::new(self.variable_name.clone(), json)),
        }
    }
}
