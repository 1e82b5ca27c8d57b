//! Quoting and literal rendering for SphinxQL.

use crate::errors::SphinxError;
use sphinx_scout_shared::FieldValue;

/// Characters with a meaning in the full-text query syntax.
const MATCH_SPECIAL: &[char] = &[
    '\\', '(', ')', '|', '-', '!', '@', '~', '"', '&', '/', '^', '$', '=', '<',
];

/// Expressions accepted unquoted in `ORDER BY` and the select list.
const KNOWN_EXPRESSIONS: &[&str] = &["WEIGHT()", "RAND()"];

/// Quote an index or column name with backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render a column reference for `ORDER BY`.
///
/// Known expressions such as `WEIGHT()` pass through in upper case; anything
/// else is quoted as an identifier.
pub fn render_column(name: &str) -> String {
    match KNOWN_EXPRESSIONS
        .iter()
        .find(|expr| expr.eq_ignore_ascii_case(name.trim()))
    {
        Some(expr) => expr.to_string(),
        None => quote_identifier(name),
    }
}

/// Quote a string literal, escaping the characters the SQL lexer treats
/// specially.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render a value as a SphinxQL literal.
///
/// The daemon has no NULL literal for attributes, so `Null` is rejected.
pub fn render_value(value: &FieldValue) -> Result<String, SphinxError> {
    let rendered = match value {
        FieldValue::Null => {
            return Err(SphinxError::invalid_statement(
                "NULL cannot be written or compared",
            ))
        }
        FieldValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::UInt(v) => v.to_string(),
        FieldValue::Float(v) => {
            if !v.is_finite() {
                return Err(SphinxError::invalid_statement(format!(
                    "cannot render non-finite float {}",
                    v
                )));
            }
            v.to_string()
        }
        FieldValue::Text(s) => quote_string(s),
        FieldValue::Multi(values) => {
            let items: Vec<String> = values.iter().map(u64::to_string).collect();
            format!("({})", items.join(", "))
        }
    };
    Ok(rendered)
}

/// Escape every full-text operator in `text` so it is matched literally.
///
/// The engine passes query text through unescaped; callers that accept
/// untrusted input can run it through this first.
pub fn escape_match(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MATCH_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
