//! JavaScript data files: a single `const` declaration holding the JSON array.

use super::json::JsonEmitter;
use super::Emitter;
use crate::error::{ConvertError, Result};
use crate::table::Record;

pub const DEFAULT_VARIABLE_NAME: &str = "jsonData";

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Renders records as `const <name> = <json>;`.
#[derive(Debug, Clone)]
pub struct ScriptEmitter {
    pub variable_name: String,
    pub json: JsonEmitter,
}

impl ScriptEmitter {
    pub fn new(variable_name: impl Into<String>, json: JsonEmitter) -> Self {
        Self {
            variable_name: variable_name.into(),
            json,
        }
    }
}

impl Emitter for ScriptEmitter {
    fn render(&self, records: &[Record]) -> Result<String> {
        let json = self.json.render(records)?;
        to_script_assignment(&self.variable_name, &json)
    }
}

/// Wraps rendered JSON text in a constant declaration.
pub fn to_script_assignment(variable_name: &str, json: &str) -> Result<String> {
    validate_variable_name(variable_name)?;
    Ok(format!("const {variable_name} = {json};\n"))
}

/// Accepts plain ASCII JavaScript identifiers that are not reserved words.
pub fn validate_variable_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid_start && valid_rest && !RESERVED_WORDS.contains(&name) {
        Ok(())
    } else {
        Err(ConvertError::InvalidVariableName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::json::JsonStyle;
    use crate::value_conversion::ValueConversion;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_single_record_assignment() {
        let emitter = ScriptEmitter::new(
            DEFAULT_VARIABLE_NAME,
            JsonEmitter::new(JsonStyle::Spaced, ValueConversion::strings()),
        );
        let text = emitter.render(&[record(&[("a", "1")])]).unwrap();
        assert_eq!(text, "const jsonData = [{\"a\": \"1\"}];\n");
    }

    #[test]
    fn test_assignment_embeds_json_verbatim() {
        let json = JsonEmitter::new(JsonStyle::Pretty, ValueConversion::inferred());
        let records = vec![record(&[("depth", "12.5")]), record(&[("depth", "")])];

        let expected = format!("const quakes = {};\n", json.render(&records).unwrap());
        let emitter = ScriptEmitter::new("quakes", json);
        assert_eq!(emitter.render(&records).unwrap(), expected);
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(to_script_assignment("data", "[]").unwrap(), "const data = [];\n");
    }

    #[test]
    fn test_valid_variable_names() {
        for name in ["jsonData", "_rows", "$data", "data2", "hakone_data"] {
            assert!(validate_variable_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_invalid_variable_names() {
        for name in ["", "2data", "json-data", "json data", "const", "données"] {
            assert!(
                matches!(
                    validate_variable_name(name),
                    Err(ConvertError::InvalidVariableName(_))
                ),
                "{name}"
            );
        }
    }
}
