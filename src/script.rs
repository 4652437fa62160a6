//! Minimal JS module builder.
//!
//! Every piece of untrusted text enters generated code through exactly one
//! constructor here:
//!
//! - string literals → [`JsExpr::string`] (JSON-escaped, script-safe)
//! - identifiers → [`Ident`] (validated / sanitized)
//! - raw markup → [`JsExpr::markup`] (template-literal-escaped)
//! - serialized values → [`JsExpr::literal`] (trusted output of a `PropsSerializer`)
//!
//! Call sites never concatenate source text themselves.

use std::fmt;

use crate::utils::{binding_suffix, escape_js_template_literal, is_js_identifier, js_string_literal};

const INDENT: &str = "  ";

// ---------------------------------------------------------------------------
// Ident
// ---------------------------------------------------------------------------

/// A JS binding name that is guaranteed to be a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    /// Accept `name` only if it already is a valid identifier.
    pub fn parse(name: &str) -> Option<Self> {
        is_js_identifier(name).then(|| Self(name.to_string()))
    }

    /// Build `<prefix><mount id>`, mapping non-word characters in the id to `_`.
    ///
    /// `prefix` must itself be a valid identifier.
    pub fn scoped(prefix: &'static str, mount_id: &str) -> Self {
        debug_assert!(is_js_identifier(prefix));
        match binding_suffix(mount_id) {
            Some(clean) => Self(format!("{prefix}{clean}")),
            None => Self(format!("{prefix}{mount_id}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Imports
// ---------------------------------------------------------------------------

/// A top-level static `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDecl {
    /// `import <binding> from "<source>";`
    Default { binding: Ident, source: String },
    /// `import { <export> as <binding> } from "<source>";`
    Named {
        export: Ident,
        binding: Ident,
        source: String,
    },
}

impl ImportDecl {
    pub fn binding(&self) -> &Ident {
        match self {
            Self::Default { binding, .. } | Self::Named { binding, .. } => binding,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Default { source, .. } | Self::Named { source, .. } => source,
        }
    }
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default { binding, source } => {
                write!(f, "import {} from {};", binding, js_string_literal(source))
            }
            Self::Named {
                export,
                binding,
                source,
            } => write!(
                f,
                "import {{ {} as {} }} from {};",
                export,
                binding,
                js_string_literal(source)
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// The handful of expression shapes loader scripts are made of.
#[derive(Debug, Clone, PartialEq)]
pub enum JsExpr {
    Str(String),
    Ident(Ident),
    Literal(String),
    Markup(String),
    /// `document.querySelector("<selector>")`
    QuerySelector(String),
    /// `async () => (await import("<source>")).default`
    LazyDefault(String),
    Object(Vec<(&'static str, JsExpr)>),
}

impl JsExpr {
    pub fn string(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Pre-serialized source text. Only serializer output belongs here.
    pub fn literal(source: impl Into<String>) -> Self {
        Self::Literal(source.into())
    }

    pub fn markup(html: impl Into<String>) -> Self {
        Self::Markup(html.into())
    }

    pub fn object(entries: Vec<(&'static str, JsExpr)>) -> Self {
        Self::Object(entries)
    }

    fn write(&self, out: &mut String, depth: usize) {
        match self {
            Self::Str(s) => out.push_str(&js_string_literal(s)),
            Self::Ident(ident) => out.push_str(ident.as_str()),
            Self::Literal(source) => out.push_str(source),
            Self::Markup(html) => {
                out.push('`');
                out.push_str(&escape_js_template_literal(html));
                out.push('`');
            }
            Self::QuerySelector(selector) => {
                out.push_str("document.querySelector(");
                out.push_str(&js_string_literal(selector));
                out.push(')');
            }
            Self::LazyDefault(source) => {
                out.push_str("async () => (await import(");
                out.push_str(&js_string_literal(source));
                out.push_str(")).default");
            }
            Self::Object(entries) => {
                if entries.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{\n");
                for (key, value) in entries {
                    push_indent(out, depth + 1);
                    out.push_str(key);
                    out.push_str(": ");
                    value.write(out, depth + 1);
                    out.push_str(",\n");
                }
                push_indent(out, depth);
                out.push('}');
            }
        }
    }
}

impl From<Ident> for JsExpr {
    fn from(ident: Ident) -> Self {
        Self::Ident(ident)
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

// ---------------------------------------------------------------------------
// ModuleScript
// ---------------------------------------------------------------------------

/// An inline ES module: import header followed by call statements.
#[derive(Debug, Clone, Default)]
pub struct ModuleScript {
    imports: Vec<ImportDecl>,
    calls: Vec<(Ident, JsExpr)>,
}

impl ModuleScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import(mut self, decl: ImportDecl) -> Self {
        self.imports.push(decl);
        self
    }

    pub fn imports(&self) -> &[ImportDecl] {
        &self.imports
    }

    /// Append `<callee>(<arg>);`.
    pub fn call(mut self, callee: Ident, arg: JsExpr) -> Self {
        self.calls.push((callee, arg));
        self
    }

    /// Module body text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for decl in &self.imports {
            out.push_str(&decl.to_string());
            out.push('\n');
        }
        for (callee, arg) in &self.calls {
            out.push('\n');
            out.push_str(callee.as_str());
            out.push('(');
            arg.write(&mut out, 0);
            out.push_str(");\n");
        }
        out
    }

    /// Wrap the body in a single `<script type="module">` element.
    pub fn to_script_tag(&self) -> String {
        format!("<script type=\"module\">\n{}</script>", self.render())
    }
}
