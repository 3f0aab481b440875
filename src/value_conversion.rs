use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How cell text becomes a JSON value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    /// Every cell is a JSON string, exactly as read.
    #[default]
    Strings,
    /// Numbers, booleans and empty cells get native JSON types.
    Inferred,
}

/// Value typing policy applied while rendering records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueConversion {
    pub mode: ValueMode,
    /// Columns that stay strings even when inference is on.
    pub string_fields: Vec<String>,
}

impl ValueConversion {
    pub fn new(mode: ValueMode, string_fields: Vec<String>) -> Self {
        Self {
            mode,
            string_fields,
        }
    }

    pub fn strings() -> Self {
        Self::default()
    }

    pub fn inferred() -> Self {
        Self::new(ValueMode::Inferred, Vec::new())
    }

    pub fn convert(&self, header_name: &str, field: &str) -> Value {
        let infer = self.mode == ValueMode::Inferred
            && !self.string_fields.iter().any(|f| f == header_name);
        convert_field_value(field, infer)
    }
}

/// Converts a field value to a JSON value, inferring a type when `infer` is set
pub fn convert_field_value(field: &str, infer: bool) -> Value {
    if !infer {
        return Value::String(field.to_string());
    }

    // Leading zeros mark identifiers (zipcodes, station codes), not numbers
    let digits = field.strip_prefix('-').unwrap_or(field);
    let has_leading_zero = digits.starts_with('0') && digits.len() > 1 && !digits.starts_with("0.");
    // "-0" would lose its sign as an integer
    let negative_zero = field == "-0";

    if field.is_empty() {
        Value::Null
    } else if field.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if field.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else if has_leading_zero || negative_zero {
        Value::String(field.to_string())
    } else if let Ok(num) = field.parse::<i64>() {
        Value::Number(num.into())
    } else if let Ok(num) = field.parse::<f64>() {
        // NaN and infinities have no JSON form
        serde_json::Number::from_f64(num)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(field.to_string()))
    } else {
        Value::String(field.to_string())
    }
}
