use std::fmt;

use super::{sorted_entries, Value};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Append `value` to `out` as compact JSON with object keys sorted.
///
/// String contents are written as stored, so escapes carried over from the
/// source come back unchanged. Raw control bytes the lexer let through are
/// escaped so the output is always JSON.
pub fn write_compact(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_compact(item, out);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (idx, (key, item)) in sorted_entries(entries).into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_quoted(key, out);
                out.push(':');
                write_compact(item, out);
            }
            out.push('}');
        }
        scalar => write_scalar(scalar, out),
    }
}

/// Like [`write_compact`], but one member per line, nested `indent` spaces
/// per level. An `indent` of 0 falls back to the compact form.
///
/// # Examples
/// ```
/// use json_ledger::{parse_str, value::write_pretty};
///
/// let bundle = parse_str(r#"{"b":[1],"a":{}}"#)?;
/// let mut out = String::new();
/// write_pretty(bundle.root(), 2, &mut out);
/// assert_eq!(out, "{\n  \"a\": {},\n  \"b\": [\n    1\n  ]\n}");
/// # Ok::<(), json_ledger::Error>(())
/// ```
pub fn write_pretty(value: &Value, indent: usize, out: &mut String) {
    if indent == 0 {
        write_compact(value, out);
    } else {
        write_nested(value, indent, 0, out);
    }
}

fn write_nested(value: &Value, indent: usize, level: usize, out: &mut String) {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                newline(indent, level + 1, out);
                write_nested(item, indent, level + 1, out);
            }
            newline(indent, level, out);
            out.push(']');
        }
        Value::Object(entries) if !entries.is_empty() => {
            out.push('{');
            for (idx, (key, item)) in sorted_entries(entries).into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                newline(indent, level + 1, out);
                write_quoted(key, out);
                out.push_str(": ");
                write_nested(item, indent, level + 1, out);
            }
            newline(indent, level, out);
            out.push('}');
        }
        other => write_compact(other, out),
    }
}

fn newline(indent: usize, level: usize, out: &mut String) {
    out.push('\n');
    out.extend(std::iter::repeat(' ').take(indent * level));
}

fn write_scalar(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Integer(number) => {
            let mut buffer = itoa::Buffer::new();
            out.push_str(buffer.format(*number));
        }
        Value::Float(number) => write_float(*number, out),
        Value::String(text) => write_quoted(text, out),
        Value::Array(_) | Value::Object(_) => write_compact(value, out),
    }
}

/// Quote stored string text. A backslash keeps the byte after it, matching
/// the lexer; a control byte, or a backslash with nothing printable after
/// it, is escaped.
pub(super) fn write_quoted(text: &str, out: &mut String) {
    out.push('"');
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' if bytes.get(idx + 1).is_some_and(|next| *next >= 0x20) => idx += 2,
            b'\\' => {
                out.push_str(&text[start..idx]);
                out.push_str("\\\\");
                idx += 1;
                start = idx;
            }
            byte if byte < 0x20 => {
                out.push_str(&text[start..idx]);
                push_control(byte, out);
                idx += 1;
                start = idx;
            }
            _ => idx += 1,
        }
    }
    out.push_str(&text[start..]);
    out.push('"');
}

fn push_control(byte: u8, out: &mut String) {
    match byte {
        b'\n' => out.push_str("\\n"),
        b'\r' => out.push_str("\\r"),
        b'\t' => out.push_str("\\t"),
        0x08 => out.push_str("\\b"),
        0x0c => out.push_str("\\f"),
        _ => {
            out.push_str("\\u00");
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0f)]));
        }
    }
}

fn write_float(number: f64, out: &mut String) {
    if !number.is_finite() {
        out.push_str("null");
        return;
    }
    let mut buffer = ryu::Buffer::new();
    out.push_str(buffer.format_finite(number));
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_compact(self, &mut out);
        f.write_str(&out)
    }
}
