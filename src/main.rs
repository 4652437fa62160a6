use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use slinkity_loader::{emit, LoaderDirective, LoaderRegistry, MountContext};
use tracing_subscriber::EnvFilter;

/// One mount point as handed over by the markup pipeline.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct MountPayload {
    component_path: String,
    id: String,
    #[serde(default)]
    loader: LoaderDirective,
    #[serde(default = "empty_props")]
    props: Value,
    client_renderer: String,
    #[serde(default)]
    children: Option<String>,
}

/// Absent `props` means no props; an explicit `null` is kept as `null`.
fn empty_props() -> Value {
    Value::Object(Map::new())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("[slinkity-loader] {:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let loaders_path = parse_loaders_path()?;
    let registry = LoaderRegistry::from_path(&loaders_path)
        .with_context(|| format!("failed to load loaders from '{}'", loaders_path.display()))?;

    let mut stdin_payload = String::new();
    io::stdin()
        .read_to_string(&mut stdin_payload)
        .context("failed to read stdin")?;

    if stdin_payload.trim().is_empty() {
        bail!("stdin payload is empty");
    }

    let scripts = generate(&stdin_payload, &registry)?;

    let mut stdout = io::stdout().lock();
    if !scripts.is_empty() {
        writeln!(stdout, "{}", scripts.join("\n")).context("failed to write stdout")?;
    }
    Ok(())
}

/// Parse the stdin payload (one mount object or an array of them).
fn parse_input(json: &str) -> Result<Vec<MountPayload>> {
    let input: Value = serde_json::from_str(json).context("invalid input JSON")?;
    match input {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                serde_json::from_value(item).with_context(|| format!("input[{position}]"))
            })
            .collect(),
        Value::Object(_) => Ok(vec![serde_json::from_value(input).context("input")?]),
        _ => bail!("input must be a mount object or an array of mount objects"),
    }
}

/// Emit the scripts for every mount in `json`, skipping static mounts.
fn generate(json: &str, registry: &LoaderRegistry) -> Result<Vec<String>> {
    let payloads = parse_input(json)?;
    let mut scripts = Vec::with_capacity(payloads.len());
    for (position, payload) in payloads.into_iter().enumerate() {
        validate_payload(&payload).with_context(|| format!("input[{position}]"))?;
        let directive = payload.loader.clone();
        let ctx = into_mount_context(payload);
        let script = emit(&ctx, &directive, registry)?;
        if !script.is_empty() {
            scripts.push(script);
        }
    }
    Ok(scripts)
}

fn parse_loaders_path() -> Result<PathBuf> {
    let mut loaders: Option<PathBuf> = None;
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--loaders" => {
                let value = args.next().context("missing value for --loaders")?;
                loaders = Some(PathBuf::from(value));
            }
            _ => {
                bail!("unknown argument '{arg}'. usage: slinkity-loader --loaders <path>");
            }
        }
    }

    loaders.context("required flag missing: --loaders <path>")
}

fn validate_payload(payload: &MountPayload) -> Result<()> {
    if payload.id.trim().is_empty() {
        bail!("id must be a non-empty string");
    }
    if payload.component_path.trim().is_empty() {
        bail!("componentPath must be a non-empty string");
    }
    if payload.client_renderer.trim().is_empty() {
        bail!("clientRenderer must be a non-empty string");
    }
    Ok(())
}

fn into_mount_context(payload: MountPayload) -> MountContext {
    let mut ctx = MountContext::new(payload.id, payload.component_path, payload.client_renderer)
        .with_props_value(payload.props);
    if let Some(children) = payload.children {
        ctx = ctx.with_children(children);
    }
    ctx
}
