//! End-to-end scenarios: directive in, script text out.

use pretty_assertions::assert_eq;
use serde_json::json;
use slinkity_loader::{emit, LoaderDirective, LoaderRegistry, MountContext};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const LOADERS: &str = r#"{
    "onClientLoad": { "client": "/_slinkity/onClientLoad.mjs", "isDynamicComponentImport": false },
    "onClientIdle": { "client": "/_slinkity/onClientIdle.mjs", "isDynamicComponentImport": true },
    "onClientVisible": { "client": "/_slinkity/onClientVisible.mjs", "isDynamicComponentImport": true },
    "onClientMedia": {
        "client": { "name": "onClientMedia", "mod": "/_slinkity/media.mjs" },
        "isDynamicComponentImport": true
    }
}"#;

fn registry() -> LoaderRegistry {
    LoaderRegistry::from_json_str(LOADERS).unwrap()
}

fn counter(id: &str) -> MountContext {
    MountContext::new(id, "/src/_components/Counter.jsx", "/_slinkity/react/client.mjs")
        .with_props_value(json!({"initial": 3}))
        .with_children("<button>+</button>")
}

fn static_imports(script: &str) -> Vec<&str> {
    script
        .lines()
        .filter(|line| line.starts_with("import "))
        .collect()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn visible_loader_imports_only_the_loader() {
    let script = emit(
        &counter("0"),
        &LoaderDirective::expr("onClientVisible"),
        &registry(),
    )
    .unwrap();

    assert_eq!(
        static_imports(&script),
        vec![r#"import loader0 from "/_slinkity/onClientVisible.mjs";"#]
    );
    assert!(script.contains(
        r#"renderer: async () => (await import("/_slinkity/react/client.mjs")).default,"#
    ));
    assert!(script.contains(
        r#"mod: async () => (await import("/src/_components/Counter.jsx")).default,"#
    ));
}

#[test]
fn true_flag_imports_loader_component_and_renderer() {
    let script = emit(&counter("1"), &LoaderDirective::from(true), &registry()).unwrap();

    assert_eq!(
        static_imports(&script),
        vec![
            r#"import loader1 from "/_slinkity/onClientLoad.mjs";"#,
            r#"import Component1 from "/src/_components/Counter.jsx";"#,
            r#"import renderer1 from "/_slinkity/react/client.mjs";"#,
        ]
    );
    assert!(script.contains("renderer: renderer1,"));
    assert!(script.contains("mod: Component1,"));
    assert!(!script.contains("await import("));
}

#[test]
fn unregistered_loader_with_empty_registry_is_empty() {
    let script = emit(
        &counter("2"),
        &LoaderDirective::expr("notRegistered(x)"),
        &LoaderRegistry::new(),
    )
    .unwrap();
    assert_eq!(script, "");
}

#[test]
fn unregistered_loader_with_populated_registry_is_empty() {
    for directive in ["onClientHover", "onclientload", "onClientMedia()", "none"] {
        let script = emit(&counter("3"), &directive.into(), &registry()).unwrap();
        assert_eq!(script, "", "directive {directive:?}");
    }
}

#[test]
fn media_loader_passes_raw_args_and_named_import() {
    let script = emit(
        &counter("4"),
        &LoaderDirective::expr("onClientMedia((max-width: 600px))"),
        &registry(),
    )
    .unwrap();

    assert_eq!(
        static_imports(&script),
        vec![r#"import { onClientMedia as loader4 } from "/_slinkity/media.mjs";"#]
    );
    assert!(script.contains(r#"args: "(max-width: 600px)","#));
}

#[test]
fn script_is_a_single_module_element() {
    let script = emit(&counter("5"), &LoaderDirective::Enabled, &registry()).unwrap();
    assert!(script.starts_with("<script type=\"module\">\n"));
    assert!(script.ends_with("\n</script>"));
    assert_eq!(script.matches("<script").count(), 1);
    assert_eq!(script.matches("</script>").count(), 1);
}

#[test]
fn target_addresses_the_mount_point() {
    let script = emit(&counter("6"), &LoaderDirective::Enabled, &registry()).unwrap();
    assert!(script.contains(
        r#"target: document.querySelector("slinkity-mount-point[data-s-id=\"6\"]"),"#
    ));
    assert!(script.contains(r#"id: "6","#));
}

#[test]
fn same_component_mounted_twice_uses_distinct_bindings() {
    let first = emit(&counter("7"), &LoaderDirective::Enabled, &registry()).unwrap();
    let second = emit(&counter("8"), &LoaderDirective::Enabled, &registry()).unwrap();

    assert!(first.contains("Component7") && !first.contains("Component8"));
    assert!(second.contains("Component8") && !second.contains("Component7"));
    assert!(second.contains("loader8({"));
}

#[test]
fn strategy_selection_is_driven_by_registry_entry() {
    let eager = LoaderRegistry::from_json_str(
        r#"{ "onClientIdle": { "client": "/idle.mjs", "isDynamicComponentImport": false } }"#,
    )
    .unwrap();
    let dynamic = LoaderRegistry::from_json_str(
        r#"{ "onClientIdle": { "client": "/idle.mjs", "isDynamicComponentImport": true } }"#,
    )
    .unwrap();
    let directive = LoaderDirective::expr("onClientIdle");

    let eager_script = emit(&counter("9"), &directive, &eager).unwrap();
    let dynamic_script = emit(&counter("9"), &directive, &dynamic).unwrap();

    assert!(eager_script.contains("import Component9 from"));
    assert!(eager_script.contains("import renderer9 from"));
    assert!(!dynamic_script.contains("import Component9 from"));
    assert!(!dynamic_script.contains("import renderer9 from"));
    assert_eq!(static_imports(&dynamic_script).len(), 1);
}

#[test]
fn windows_component_paths_are_normalized() {
    let ctx = MountContext::new("10", r"C:\site\src\Counter.vue", r"C:\site\renderers\vue.mjs");
    let script = emit(&ctx, &LoaderDirective::expr("onClientIdle"), &registry()).unwrap();
    assert!(script.contains(r#"(await import("C:/site/src/Counter.vue")).default"#));
    assert!(script.contains(r#"(await import("C:/site/renderers/vue.mjs")).default"#));
}
