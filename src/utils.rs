//! Utility functions for script generation.
//!
//! - JS string / template literal escaping (injection-safe inside `<script>`)
//! - Identifier checks and mount-id binding suffixes
//! - Module specifier normalization

// ---------------------------------------------------------------------------
// Mount Point Contract
// ---------------------------------------------------------------------------

/// Custom element that wraps every server-rendered island.
pub const MOUNT_POINT_TAG: &str = "slinkity-mount-point";

/// Attribute on [`MOUNT_POINT_TAG`] carrying the unique mount id.
pub const MOUNT_ID_ATTR: &str = "data-s-id";

/// CSS selector that addresses exactly one mount point.
pub fn mount_point_selector(mount_id: &str) -> String {
    format!(
        "{}[{}=\"{}\"]",
        MOUNT_POINT_TAG,
        MOUNT_ID_ATTR,
        escape_css_attr_value(mount_id)
    )
}

/// Escape a value for use inside a double-quoted CSS attribute selector.
pub fn escape_css_attr_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            '\r' => out.push_str("\\d "),
            '\u{c}' => out.push_str("\\c "),
            '\0' => out.push_str("\\fffd "),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// JS String Escaping
// ---------------------------------------------------------------------------

/// Escape a string for safe embedding inside a JS template literal (backtick string)
/// that itself lives inside an inline `<script>` element.
///
/// Escapes backslashes, backticks and `${`, plus `</` and `<!--` so the
/// markup can never close or confuse the enclosing script element. Carriage
/// returns are written as `\r` because template literals normalize raw CR
/// and CRLF to LF.
pub fn escape_js_template_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        match chars[i] {
            '\\' => {
                out.push_str("\\\\");
            }
            '`' => {
                out.push_str("\\`");
            }
            '\r' => {
                out.push_str("\\r");
            }
            '$' if i + 1 < len && chars[i + 1] == '{' => {
                out.push_str("\\${");
                i += 1; // skip the '{'
            }
            '<' if i + 1 < len && chars[i + 1] == '/' => {
                out.push_str("<\\/");
                i += 1;
            }
            '<' if chars[i..].starts_with(&['<', '!', '-', '-']) => {
                out.push_str("<\\!--");
                i += 3;
            }
            c => {
                out.push(c);
            }
        }
        i += 1;
    }
    out
}

/// Render a string as a double-quoted JS string literal.
///
/// Output is JSON (and therefore valid JS) with `<`, U+2028 and U+2029
/// written as `\uXXXX` escapes, so it is safe inside an inline `<script>`.
pub fn js_string_literal(s: &str) -> String {
    // Serializing a &str into JSON cannot fail.
    let json = serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""));
    escape_script_sensitive(&json)
}

/// Rewrite characters that are harmless in JSON but hazardous in an inline
/// script. Only valid on JSON text, where these characters can appear
/// inside string literals exclusively.
pub fn escape_script_sensitive(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Check whether `s` is a plain JS identifier (ASCII subset).
pub fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Map a mount id onto a suffix that is legal inside a JS binding name.
///
/// Word characters pass through unchanged; everything else becomes `_`.
/// Returns `None` when the id was already clean.
pub fn binding_suffix(mount_id: &str) -> Option<String> {
    if mount_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        return None;
    }
    Some(
        mount_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                    c
                } else {
                    '_'
                }
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Module Specifiers
// ---------------------------------------------------------------------------

/// Normalize a filesystem path into an import-safe module specifier:
/// backslashes become `/` and repeated separators collapse.
pub fn normalize_module_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
