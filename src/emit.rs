//! Loader script emission.
//!
//! Pipeline per mount point:
//! 1. Decode the directive into `(name, args)`
//! 2. Resolve `name` against the registry (miss → empty output)
//! 3. Build the import header for the resolved strategy
//! 4. Assemble the loader call and wrap it in `<script type="module">`
//!
//! Two strategies exist. `Eager` imports component and renderer at the top
//! of the module and passes the bindings directly. `Dynamic` imports only
//! the loader and passes async accessors, so the component bundle is not
//! fetched until the loader decides to hydrate.

use crate::directive::{decode, LoaderDirective};
use crate::imports::{eager_imports, loader_binding, loader_import};
use crate::registry::{LoaderRegistry, LoaderStrategy};
use crate::script::{JsExpr, ModuleScript};
use crate::serialize::{JsonLiteralSerializer, PropsSerializer};
use crate::utils::{binding_suffix, mount_point_selector, normalize_module_path};
use crate::{Diagnostic, DiagnosticLevel, MountContext, ScriptError};

/// Result of emitting one mount point, with diagnostics collected on the way.
#[derive(Debug, Clone, Default)]
pub struct EmitOutput {
    /// The `<script>` element, or empty when the mount stays static.
    pub script: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Emit the loader script for one mount point with the default serializer.
pub fn emit(
    ctx: &MountContext,
    directive: &LoaderDirective,
    registry: &LoaderRegistry,
) -> Result<String, ScriptError> {
    emit_with_serializer(ctx, directive, registry, &JsonLiteralSerializer)
}

/// Emit the loader script for one mount point using `serializer` for props.
pub fn emit_with_serializer(
    ctx: &MountContext,
    directive: &LoaderDirective,
    registry: &LoaderRegistry,
    serializer: &dyn PropsSerializer,
) -> Result<String, ScriptError> {
    emit_with_diagnostics(ctx, directive, registry, serializer).map(|out| out.script)
}

/// Emit the loader script and report what happened as [`Diagnostic`]s.
pub fn emit_with_diagnostics(
    ctx: &MountContext,
    directive: &LoaderDirective,
    registry: &LoaderRegistry,
    serializer: &dyn PropsSerializer,
) -> Result<EmitOutput, ScriptError> {
    let mut diagnostics = Vec::new();
    let (name, args) = decode(directive);

    let Some(strategy) = registry.resolve(name) else {
        tracing::debug!(mount_id = %ctx.id, loader = name, "no loader registered; rendering static");
        diagnostics.push(Diagnostic {
            level: DiagnosticLevel::Info,
            message: format!("No loader registered for '{}'; mount {} is static", name, ctx.id),
            context: Some(ctx.component_path.clone()),
        });
        return Ok(EmitOutput {
            script: String::new(),
            diagnostics,
        });
    };

    if let Some(clean) = binding_suffix(&ctx.id) {
        tracing::warn!(mount_id = %ctx.id, suffix = %clean, "mount id is not identifier-safe");
        diagnostics.push(Diagnostic {
            level: DiagnosticLevel::Warning,
            message: format!(
                "Mount id '{}' contains non-word characters; bindings use suffix '{}'",
                ctx.id, clean
            ),
            context: Some(ctx.component_path.clone()),
        });
    }

    let props = serializer
        .serialize(&ctx.props)
        .map_err(|source| ScriptError::PropsSerialization {
            mount_id: ctx.id.clone(),
            component_path: ctx.component_path.clone(),
            source,
        })?;

    tracing::debug!(
        mount_id = %ctx.id,
        loader = name,
        args,
        dynamic = strategy.is_dynamic(),
        "emitting loader script"
    );

    let mut script = ModuleScript::new().import(loader_import(strategy.client(), &ctx.id));

    let (renderer, module) = match strategy {
        LoaderStrategy::Eager(_) => {
            let [component, renderer] = eager_imports(ctx);
            let accessors = (
                JsExpr::from(renderer.binding().clone()),
                JsExpr::from(component.binding().clone()),
            );
            script = script.import(component).import(renderer);
            accessors
        }
        LoaderStrategy::Dynamic(_) => (
            JsExpr::LazyDefault(normalize_module_path(&ctx.renderer_path)),
            JsExpr::LazyDefault(normalize_module_path(&ctx.component_path)),
        ),
    };

    let call = JsExpr::object(vec![
        ("id", JsExpr::string(ctx.id.as_str())),
        ("args", JsExpr::string(args)),
        ("target", JsExpr::QuerySelector(mount_point_selector(&ctx.id))),
        ("renderer", renderer),
        (
            "component",
            JsExpr::object(vec![
                ("mod", module),
                ("props", JsExpr::literal(props)),
                (
                    "children",
                    JsExpr::markup(ctx.children.as_deref().unwrap_or_default()),
                ),
            ]),
        ),
    ]);

    let script = script.call(loader_binding(&ctx.id), call).to_script_tag();

    diagnostics.push(Diagnostic {
        level: DiagnosticLevel::Info,
        message: format!(
            "Mount {} hydrates via '{}' ({})",
            ctx.id,
            name,
            if strategy.is_dynamic() { "dynamic" } else { "eager" }
        ),
        context: Some(ctx.component_path.clone()),
    });

    Ok(EmitOutput {
        script,
        diagnostics,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
