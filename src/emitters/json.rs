//! JSON array-of-objects output.

use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::io;

use super::Emitter;
use crate::error::{ConvertError, Result};
use crate::table::Record;
use crate::value_conversion::ValueConversion;

/// Whitespace convention of the rendered JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum JsonStyle {
    /// `[{"a":"1","b":"2"}]`
    Compact,
    /// `[{"a": "1", "b": "2"}]`
    Spaced,
    /// Four-space indentation, one key per line.
    #[default]
    Pretty,
}

/// Single-line JSON with a space after every `,` and `:`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Renders records as a JSON array, one object per record.
#[derive(Debug, Clone, Default)]
pub struct JsonEmitter {
    pub style: JsonStyle,
    pub conversion: ValueConversion,
}

impl JsonEmitter {
    pub fn new(style: JsonStyle, conversion: ValueConversion) -> Self {
        Self { style, conversion }
    }
}

impl Emitter for JsonEmitter {
    fn render(&self, records: &[Record]) -> Result<String> {
        to_json(records, self.style, &self.conversion)
    }
}

/// Serializes records as a JSON array of objects.
///
/// Row order is kept, and keys inside each object follow the record's column
/// order.
pub fn to_json(records: &[Record], style: JsonStyle, conversion: &ValueConversion) -> Result<String> {
    let typed: Vec<TypedRecord<'_>> = records
        .iter()
        .map(|record| TypedRecord { record, conversion })
        .collect();

    match style {
        JsonStyle::Compact => render_with(&typed, CompactFormatter),
        JsonStyle::Spaced => render_with(&typed, SpacedFormatter),
        JsonStyle::Pretty => render_with(&typed, PrettyFormatter::with_indent(b"    ")),
    }
}

fn render_with<T: Serialize + ?Sized, F: Formatter>(value: &T, formatter: F) -> Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ConvertError::Json(serde_json::Error::custom(e)))
}

struct TypedRecord<'a> {
    record: &'a Record,
    conversion: &'a ValueConversion,
}

impl Serialize for TypedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len()))?;
        for (column, field) in self.record.iter() {
            map.serialize_entry(column, &self.conversion.convert(column, field))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ParseOptions, Table};
    use serde_json::Value;

    fn records(input: &str) -> Vec<Record> {
        Table::parse(input.as_bytes(), &ParseOptions::default())
            .unwrap()
            .records()
    }

    #[test]
    fn test_compact_all_columns() {
        let json = to_json(
            &records("a\tb\n1\t2\n3\t4\n"),
            JsonStyle::Compact,
            &ValueConversion::strings(),
        )
        .unwrap();
        assert_eq!(json, r#"[{"a":"1","b":"2"},{"a":"3","b":"4"}]"#);
    }

    #[test]
    fn test_spaced_single_record() {
        let json = to_json(&records("a\n1\n"), JsonStyle::Spaced, &ValueConversion::strings()).unwrap();
        assert_eq!(json, r#"[{"a": "1"}]"#);
    }

    #[test]
    fn test_spaced_multiple_records() {
        let json = to_json(
            &records("a\tb\n1\t2\n3\t4\n"),
            JsonStyle::Spaced,
            &ValueConversion::strings(),
        )
        .unwrap();
        assert_eq!(json, r#"[{"a": "1", "b": "2"}, {"a": "3", "b": "4"}]"#);
    }

    #[test]
    fn test_pretty_uses_four_space_indent() {
        let json = to_json(&records("a\n1\n"), JsonStyle::Pretty, &ValueConversion::strings()).unwrap();
        assert_eq!(json, "[\n    {\n        \"a\": \"1\"\n    }\n]");
    }

    #[test]
    fn test_no_records_is_empty_array() {
        for style in [JsonStyle::Compact, JsonStyle::Spaced, JsonStyle::Pretty] {
            let json = to_json(&[], style, &ValueConversion::strings()).unwrap();
            assert_eq!(json, "[]");
        }
    }

    #[test]
    fn test_key_order_follows_header_not_alphabet() {
        let json = to_json(
            &records("zeta\talpha\n1\t2\n"),
            JsonStyle::Compact,
            &ValueConversion::strings(),
        )
        .unwrap();
        assert_eq!(json, r#"[{"zeta":"1","alpha":"2"}]"#);
    }

    #[test]
    fn test_duplicate_header_written_once_with_first_value() {
        let json = to_json(&records("a\ta\n1\t2\n"), JsonStyle::Compact, &ValueConversion::strings())
            .unwrap();
        assert_eq!(json, r#"[{"a":"1"}]"#);

        let parsed: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["a"], "1");
    }

    #[test]
    fn test_string_escaping() {
        let json = to_json(
            &records("quote\tslash\tname\n\"say \"\"hi\"\"\"\ta\\b\tHakoné\n"),
            JsonStyle::Compact,
            &ValueConversion::strings(),
        )
        .unwrap();
        assert_eq!(json, r#"[{"quote":"say \"hi\"","slash":"a\\b","name":"Hakoné"}]"#);
    }

    #[test]
    fn test_inferred_values() {
        let json = to_json(
            &records("depth\tyear\tlabel\tzip\tnote\n5.5\t2001\tx\t0123\t\n"),
            JsonStyle::Spaced,
            &ValueConversion::inferred(),
        )
        .unwrap();
        assert_eq!(
            json,
            r#"[{"depth": 5.5, "year": 2001, "label": "x", "zip": "0123", "note": null}]"#
        );
    }

    #[test]
    fn test_output_parses_back_to_rows() {
        let input = "a\tb\tc\n1\t\t3\nx y\tz\t\n";
        let json = to_json(&records(input), JsonStyle::Pretty, &ValueConversion::strings()).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["a"], "1");
        assert_eq!(parsed[0]["b"], "");
        assert_eq!(parsed[1]["a"], "x y");
        assert_eq!(parsed[1]["c"], "");
    }

    #[test]
    fn test_emitter_renders_with_its_settings() {
        let emitter = JsonEmitter::new(JsonStyle::Compact, ValueConversion::inferred());
        assert_eq!(emitter.render(&records("n\n7\n")).unwrap(), r#"[{"n":7}]"#);
    }
}
