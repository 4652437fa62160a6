//! Loader directive decoding.
//!
//! A directive is what the author writes on a component instance to pick a
//! hydration strategy: `true`, `"onClientIdle"`, or
//! `"onClientMedia(prefers-reduced-motion)"`. Decoding never fails; anything
//! that cannot name a loader decodes to [`NONE_LOADER`].

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loader name a bare `true` flag resolves to.
pub const DEFAULT_LOADER: &str = "onClientLoad";

/// Loader name for directives that are neither `true` nor a string.
pub const NONE_LOADER: &str = "none";

/// The raw hydration directive attached to one mount point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum LoaderDirective {
    /// The boolean flag `true` (e.g. `hydrate=true`).
    Enabled,
    /// A loader expression: `name` or `name(args)`.
    Expr(String),
    /// Any other value (absent, `false`, numbers, objects, ...).
    #[default]
    Unrecognized,
}

impl LoaderDirective {
    pub fn expr(expr: impl Into<String>) -> Self {
        Self::Expr(expr.into())
    }
}

impl From<bool> for LoaderDirective {
    fn from(flag: bool) -> Self {
        if flag {
            Self::Enabled
        } else {
            Self::Unrecognized
        }
    }
}

impl From<&str> for LoaderDirective {
    fn from(expr: &str) -> Self {
        Self::Expr(expr.to_string())
    }
}

impl From<String> for LoaderDirective {
    fn from(expr: String) -> Self {
        Self::Expr(expr)
    }
}

impl<T: Into<LoaderDirective>> From<Option<T>> for LoaderDirective {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unrecognized, Into::into)
    }
}

impl From<Value> for LoaderDirective {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(true) => Self::Enabled,
            Value::String(s) => Self::Expr(s),
            _ => Self::Unrecognized,
        }
    }
}

impl From<LoaderDirective> for Value {
    fn from(directive: LoaderDirective) -> Self {
        match directive {
            LoaderDirective::Enabled => Value::Bool(true),
            LoaderDirective::Expr(s) => Value::String(s),
            LoaderDirective::Unrecognized => Value::Null,
        }
    }
}

/// `name(args)`, mirroring ECMAScript `/^(\w+)\((.+)\)$/`: ASCII word
/// characters only, and `.` excludes JS line terminators.
fn loader_with_args() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9A-Za-z_]+)\(([^\n\r\u{2028}\u{2029}]+)\)$")
            .expect("loader directive pattern is valid")
    })
}

/// Decode a directive into its canonical `(name, args)` pair.
///
/// The argument payload is returned verbatim; interpreting it is the
/// client-side loader's job. Unbalanced or otherwise odd parentheses simply
/// fail the `name(args)` match and the whole string is taken as the name.
pub fn decode(directive: &LoaderDirective) -> (&str, &str) {
    let expr = match directive {
        LoaderDirective::Enabled => return (DEFAULT_LOADER, ""),
        LoaderDirective::Unrecognized => return (NONE_LOADER, ""),
        LoaderDirective::Expr(expr) => expr.as_str(),
    };

    match loader_with_args().captures(expr) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(name), Some(args)) => (name.as_str(), args.as_str()),
            _ => (expr, ""),
        },
        None => (expr, ""),
    }
}
